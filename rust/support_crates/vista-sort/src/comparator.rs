//! Default three-way comparators.
//!
//! Integers compare numerically. Floats compare by IEEE 754 total order, so
//! negative zero sorts before positive zero and NaNs sort to the ends
//! according to their sign bit instead of poisoning the order.

/// A type with a default ascending three-way comparison.
pub trait DefaultComparator: Copy {
    /// Returns a negative value if `a` orders before `b`, zero if they are
    /// equivalent, and a positive value otherwise.
    fn compare(a: Self, b: Self) -> i32;
}

macro_rules! impl_integer_comparator {
    ($($T:ty),*) => {
        $(
            impl DefaultComparator for $T {
                #[inline]
                fn compare(a: $T, b: $T) -> i32 {
                    (a > b) as i32 - (a < b) as i32
                }
            }
        )*
    };
}

impl_integer_comparator!(i8, i16, i32, i64, u8, u16, u32, u64);

impl DefaultComparator for f32 {
    #[inline]
    fn compare(a: f32, b: f32) -> i32 {
        a.total_cmp(&b) as i32
    }
}

impl DefaultComparator for f64 {
    #[inline]
    fn compare(a: f64, b: f64) -> i32 {
        a.total_cmp(&b) as i32
    }
}

/// Returns the default ascending comparator for `T`.
pub fn default_comparator<T: DefaultComparator>() -> fn(T, T) -> i32 {
    T::compare
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_comparators() {
        assert_eq!(i8::compare(-128, 127), -1);
        assert_eq!(u64::compare(u64::MAX, 0), 1);
        assert_eq!(i32::compare(7, 7), 0);
        assert_eq!(default_comparator::<u16>()(1, 2), -1);
    }

    #[test]
    fn test_float_comparators() {
        assert_eq!(f32::compare(1.0, 2.0), -1);
        assert_eq!(f32::compare(-0.0, 0.0), -1);
        assert_eq!(f64::compare(f64::NAN, f64::INFINITY), 1);
        assert_eq!(f64::compare(-f64::NAN, f64::NEG_INFINITY), -1);
        assert_eq!(f64::compare(2.5, 2.5), 0);
    }
}
