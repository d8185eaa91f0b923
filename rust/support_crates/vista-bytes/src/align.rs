/// Aligns a number up to the next multiple of the specified alignment.
///
/// If the input is already aligned, it is returned unchanged.
///
/// # Examples
///
/// ```
/// use vista_bytes::align::align_up;
///
/// assert_eq!(align_up(0, 8), 0);
/// assert_eq!(align_up(1, 8), 8);
/// assert_eq!(align_up(8, 8), 8);
/// assert_eq!(align_up(9, 8), 16);
/// ```
///
/// # Panics
///
/// Panics on arithmetic overflow. In debug builds, also panics if `alignment`
/// is not a power of two.
#[inline]
pub fn align_up(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    n.checked_add(alignment - 1).expect("add") & !(alignment - 1)
}

/// Aligns a number down to the previous multiple of the specified alignment.
///
/// # Examples
///
/// ```
/// use vista_bytes::align::align_down;
///
/// assert_eq!(align_down(0, 8), 0);
/// assert_eq!(align_down(7, 8), 0);
/// assert_eq!(align_down(9, 8), 8);
/// assert_eq!(align_down(16, 8), 16);
/// ```
#[inline]
pub fn align_down(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    n & !(alignment - 1)
}

/// Checks whether `ptr` is a multiple of `alignment`.
///
/// Returns `false` when `alignment` is not a power of two.
#[inline]
pub fn is_aligned_ptr(ptr: *const u8, alignment: usize) -> bool {
    alignment.is_power_of_two() && ((ptr as usize) & (alignment - 1)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_functions() {
        assert_eq!(align_up(0, 16), 0);
        assert_eq!(align_up(1, 16), 16);
        assert_eq!(align_up(15, 16), 16);
        assert_eq!(align_up(17, 16), 32);
        assert_eq!(align_up(5, 1), 5);

        assert_eq!(align_down(0, 16), 0);
        assert_eq!(align_down(15, 16), 0);
        assert_eq!(align_down(31, 16), 16);
        assert_eq!(align_down(5, 1), 5);
    }

    #[test]
    #[should_panic(expected = "add")]
    fn test_align_up_overflow() {
        align_up(usize::MAX, 16);
    }

    #[test]
    fn test_is_aligned_ptr() {
        assert!(is_aligned_ptr(64 as *const u8, 64));
        assert!(is_aligned_ptr(64 as *const u8, 8));
        assert!(!is_aligned_ptr(65 as *const u8, 2));
        assert!(!is_aligned_ptr(64 as *const u8, 3));
    }
}
