//! Element kinds: compile-time descriptors of how a view lays out, stores and
//! orders its elements.

use std::fmt::Debug;

use vista_sort::DefaultComparator;

/// Describes one fixed-width numeric element kind.
///
/// A kind is a zero-sized marker type. Everything a [`View`](crate::View) needs
/// to know about its elements is resolved from the kind at compile time: the
/// native storage type, the type accepted by stores, the element width and
/// its alignment shift, and the default ordering.
///
/// The trait is sealed: views address elements by shifting, which is only
/// valid for the power-of-two widths of the kinds defined here.
///
/// ```compile_fail
/// use vista_views::Element;
///
/// #[derive(Clone, Copy)]
/// struct Rgb;
///
/// impl Element for Rgb {
///     type Native = u8;
///     type Input = u8;
///     const NAME: &'static str = "RgbArray";
///     fn encode(value: u8) -> u8 {
///         value
///     }
/// }
/// ```
pub trait Element: sealed::Sealed + 'static {
    /// The value type stored in memory and returned by loads.
    type Native: bytemuck::Pod + PartialEq + Debug + DefaultComparator;

    /// The value type accepted by stores. Converted to [`Self::Native`] by
    /// [`Element::encode`].
    type Input: Copy;

    /// Name of the view type over this kind, e.g. `Int32Array`.
    const NAME: &'static str;

    /// Width of one element in bytes.
    const BYTES_PER_ELEMENT: usize = std::mem::size_of::<Self::Native>();

    /// `log2(BYTES_PER_ELEMENT)`; converts element indices to byte offsets.
    const ALIGN_SHIFT: u32 = Self::BYTES_PER_ELEMENT.trailing_zeros();

    /// Converts an incoming value to the representation written to memory.
    fn encode(value: Self::Input) -> Self::Native;

    /// Default three-way ordering used by `sort` when no comparator is given.
    #[inline]
    fn compare(a: Self::Native, b: Self::Native) -> i32 {
        <Self::Native as DefaultComparator>::compare(a, b)
    }

    /// Returns the default comparator as a function pointer.
    fn default_comparator() -> fn(Self::Native, Self::Native) -> i32 {
        Self::compare
    }
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_raw_element {
    ($($Kind:ident => $T:ty),* $(,)?) => {
        $(
            #[doc = concat!("Element kind storing `", stringify!($T), "` values as-is.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            pub struct $Kind;

            impl sealed::Sealed for $Kind {}

            impl Element for $Kind {
                type Native = $T;
                type Input = $T;

                const NAME: &'static str = concat!(stringify!($Kind), "Array");

                #[inline]
                fn encode(value: $T) -> $T {
                    value
                }
            }
        )*
    };
}

impl_raw_element!(
    Int8 => i8,
    Uint8 => u8,
    Int16 => i16,
    Uint16 => u16,
    Int32 => i32,
    Uint32 => u32,
    Int64 => i64,
    Uint64 => u64,
    Float32 => f32,
    Float64 => f64,
);

/// Element kind storing bytes with saturating stores: incoming `i32` values
/// below `0` are stored as `0`, values above `255` as `255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uint8Clamped;

impl sealed::Sealed for Uint8Clamped {}

impl Element for Uint8Clamped {
    type Native = u8;
    type Input = i32;

    const NAME: &'static str = "Uint8ClampedArray";

    #[inline]
    fn encode(value: i32) -> u8 {
        // Branchless clamp: the sign of `value` zeroes negatives, the sign of
        // `255 - value` saturates everything above 255 to all ones.
        (!(value >> 31) & ((255i32.wrapping_sub(value) >> 31) | value)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_widths() {
        assert_eq!(Int8::BYTES_PER_ELEMENT, 1);
        assert_eq!(Uint8Clamped::BYTES_PER_ELEMENT, 1);
        assert_eq!(Uint16::BYTES_PER_ELEMENT, 2);
        assert_eq!(Float32::BYTES_PER_ELEMENT, 4);
        assert_eq!(Int64::BYTES_PER_ELEMENT, 8);

        assert_eq!(Uint8::ALIGN_SHIFT, 0);
        assert_eq!(Int16::ALIGN_SHIFT, 1);
        assert_eq!(Uint32::ALIGN_SHIFT, 2);
        assert_eq!(Float64::ALIGN_SHIFT, 3);
    }

    fn check_addressing<K: Element>() {
        assert!(K::BYTES_PER_ELEMENT.is_power_of_two(), "{}", K::NAME);
        assert_eq!(1 << K::ALIGN_SHIFT, K::BYTES_PER_ELEMENT, "{}", K::NAME);
    }

    #[test]
    fn test_shift_addressing_matches_width() {
        check_addressing::<Int8>();
        check_addressing::<Uint8>();
        check_addressing::<Uint8Clamped>();
        check_addressing::<Int16>();
        check_addressing::<Uint16>();
        check_addressing::<Int32>();
        check_addressing::<Uint32>();
        check_addressing::<Int64>();
        check_addressing::<Uint64>();
        check_addressing::<Float32>();
        check_addressing::<Float64>();
    }

    #[test]
    fn test_element_names() {
        assert_eq!(Int8::NAME, "Int8Array");
        assert_eq!(Uint8Clamped::NAME, "Uint8ClampedArray");
        assert_eq!(Float64::NAME, "Float64Array");
    }

    #[test]
    fn test_clamped_encode() {
        assert_eq!(Uint8Clamped::encode(-5), 0);
        assert_eq!(Uint8Clamped::encode(i32::MIN), 0);
        assert_eq!(Uint8Clamped::encode(-1), 0);
        assert_eq!(Uint8Clamped::encode(0), 0);
        assert_eq!(Uint8Clamped::encode(128), 128);
        assert_eq!(Uint8Clamped::encode(255), 255);
        assert_eq!(Uint8Clamped::encode(256), 255);
        assert_eq!(Uint8Clamped::encode(300), 255);
        assert_eq!(Uint8Clamped::encode(i32::MAX), 255);
    }

    #[test]
    fn test_default_comparators() {
        assert_eq!(Int8::compare(-1, 1), -1);
        assert_eq!((Uint64::default_comparator())(9, 3), 1);
        assert_eq!(Float32::compare(f32::NAN, f32::NAN), 0);
        assert_eq!(Float32::compare(-0.0, 0.0), -1);
    }
}
