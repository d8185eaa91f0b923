//! In-place mutation and aliasing: fill, sort, subarray, reverse.
//!
//! None of these fail. Out-of-range bounds are clamped, never rejected.

use crate::{element::Element, view::View};

/// Resolves a possibly negative bound against `length`: negative values count
/// back from the end, and the result is clamped to `[0, length]`.
#[inline]
fn resolve_bound(bound: isize, length: isize) -> isize {
    if bound < 0 {
        (length + bound).max(0)
    } else {
        bound.min(length)
    }
}

impl<K: Element> View<K> {
    /// Stores `value` at every index.
    pub fn fill(&self, value: K::Input) -> &Self {
        self.fill_resolved(K::encode(value), 0, self.len());
        self
    }

    /// Stores `value` at every index in `[start, end)`.
    ///
    /// Negative bounds count back from the end of the view; all bounds are
    /// clamped to `[0, len()]`. Does nothing if `start >= end` after
    /// resolution.
    pub fn fill_range(&self, value: K::Input, start: isize, end: isize) -> &Self {
        let length = self.len() as isize;
        let start = resolve_bound(start, length);
        let end = resolve_bound(end, length);
        if start < end {
            self.fill_resolved(K::encode(value), start as usize, end as usize);
        }
        self
    }

    fn fill_resolved(&self, value: K::Native, start: usize, end: usize) {
        if start >= end {
            return;
        }
        if K::BYTES_PER_ELEMENT == 1 {
            let byte = bytemuck::bytes_of(&value)[0];
            unsafe {
                self.element_ptr(start)
                    .cast::<u8>()
                    .write_bytes(byte, end - start);
            }
        } else {
            for i in start..end {
                unsafe { self.store(i, value) };
            }
        }
    }

    /// Sorts the elements in place by the kind's default ascending order.
    ///
    /// Floats are ordered by IEEE 754 total order.
    pub fn sort(&self) -> &Self {
        self.sort_by(K::compare)
    }

    /// Sorts the elements in place by `comparator`, which returns a negative,
    /// zero or positive value like a three-way comparison.
    ///
    /// The sort is not stable.
    pub fn sort_by<F>(&self, mut comparator: F) -> &Self
    where
        F: FnMut(K::Native, K::Native) -> i32,
    {
        let length = self.len();
        if length <= 1 {
            return self;
        }
        if length == 2 {
            unsafe {
                let a = self.load(1);
                let b = self.load(0);
                if comparator(a, b) < 0 {
                    self.store(1, b);
                    self.store(0, a);
                }
            }
            return self;
        }
        log::trace!("{}::sort_by: delegating {length} elements", K::NAME);
        unsafe { vista_sort::sort_raw(self.element_ptr(0), length, comparator) };
        self
    }

    /// Returns a new view over the elements in `[begin, end)` of this one,
    /// sharing the same buffer.
    ///
    /// Negative bounds count back from the end; bounds are clamped to
    /// `[0, len()]`, and an `end` before `begin` yields an empty view.
    /// No elements are copied.
    pub fn subarray(&self, begin: isize, end: isize) -> View<K> {
        let length = self.len() as isize;
        let begin = resolve_bound(begin, length);
        let end = resolve_bound(end, length).max(begin);
        self.alias_range(begin as usize, end as usize)
    }

    /// Returns a new view over the elements from `begin` to the end of this one,
    /// sharing the same buffer.
    pub fn subarray_from(&self, begin: isize) -> View<K> {
        let length = self.len() as isize;
        let begin = resolve_bound(begin, length);
        self.alias_range(begin as usize, length as usize)
    }

    fn alias_range(&self, begin: usize, end: usize) -> View<K> {
        debug_assert!(begin <= end && end <= self.len());
        let data_start = unsafe { self.data_start().add(begin << K::ALIGN_SHIFT) };
        self.alias(data_start, (end - begin) << K::ALIGN_SHIFT)
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&self) -> &Self {
        let length = self.len();
        if length < 2 {
            return self;
        }
        let (mut front, mut back) = (0, length - 1);
        while front < back {
            unsafe { std::ptr::swap(self.element_ptr(front), self.element_ptr(back)) };
            front += 1;
            back -= 1;
        }
        self
    }
}
