//! In-place, unstable comparison sorting over raw memory regions, plus the
//! default three-way comparators for fixed-width numeric types.
//!
//! The sort entry point works on a base pointer and an element count rather
//! than a slice, so callers that share a region through several handles never
//! have to materialize a `&mut [T]` over it.

pub mod comparator;

pub use comparator::{DefaultComparator, default_comparator};

/// Regions shorter than this are sorted with insertion sort; longer ones with
/// heap sort.
pub const INSERTION_SORT_THRESHOLD: usize = 256;

/// Sorts `len` elements starting at `base` in place, ordered by `comparator`.
///
/// The comparator returns a negative value when its first argument orders
/// before the second, zero when they are equivalent, and a positive value
/// otherwise. The sort is not stable.
///
/// # Safety
///
/// `base` must be non-null, aligned for `T`, and valid for reads and writes of
/// `len` consecutive values of `T` for the whole duration of the call.
pub unsafe fn sort_raw<T, F>(base: *mut T, len: usize, mut comparator: F)
where
    T: Copy,
    F: FnMut(T, T) -> i32,
{
    if len < 2 {
        return;
    }
    if len < INSERTION_SORT_THRESHOLD {
        log::trace!("sort_raw: insertion sort, len={len}");
        unsafe { insertion_sort(base, len, &mut comparator) }
    } else {
        log::trace!("sort_raw: heap sort, len={len}");
        unsafe { heap_sort(base, len, &mut comparator) }
    }
}

unsafe fn insertion_sort<T, F>(base: *mut T, len: usize, comparator: &mut F)
where
    T: Copy,
    F: FnMut(T, T) -> i32,
{
    for i in 1..len {
        unsafe {
            let a = base.add(i).read();
            let mut j = i;
            while j > 0 {
                let b = base.add(j - 1).read();
                if comparator(a, b) < 0 {
                    base.add(j).write(b);
                    j -= 1;
                } else {
                    break;
                }
            }
            base.add(j).write(a);
        }
    }
}

unsafe fn heap_sort<T, F>(base: *mut T, len: usize, comparator: &mut F)
where
    T: Copy,
    F: FnMut(T, T) -> i32,
{
    for root in (0..len / 2).rev() {
        unsafe { sift_down(base, root, len, comparator) };
    }
    for end in (1..len).rev() {
        unsafe {
            std::ptr::swap(base, base.add(end));
            sift_down(base, 0, end, comparator);
        }
    }
}

/// Restores the max-heap property for the subtree at `root`, considering only
/// indices below `end`.
unsafe fn sift_down<T, F>(base: *mut T, mut root: usize, end: usize, comparator: &mut F)
where
    T: Copy,
    F: FnMut(T, T) -> i32,
{
    loop {
        let left = 2 * root + 1;
        if left >= end {
            break;
        }
        unsafe {
            let mut child = left;
            if left + 1 < end && comparator(base.add(left).read(), base.add(left + 1).read()) < 0 {
                child = left + 1;
            }
            if comparator(base.add(root).read(), base.add(child).read()) < 0 {
                std::ptr::swap(base.add(root), base.add(child));
                root = child;
            } else {
                break;
            }
        }
    }
}
