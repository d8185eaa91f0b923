use std::{
    ops::{Range, RangeBounds},
    ptr::NonNull,
    rc::Rc,
};

use crate::align::{align_up, is_aligned_ptr};

/// A fixed-size, zero-initialized byte region whose start is aligned to a
/// requested power-of-two boundary.
///
/// The region is carved out of an over-allocated `Vec<u8>`: the leading pad
/// moves the start to the next aligned address, and the length is padded up
/// to whole blocks. The storage never grows, shrinks or moves, so pointers
/// into it stay valid for as long as the storage itself is alive.
pub struct AlignedStorage {
    /// Backing allocation, including the leading pad. Not accessed after
    /// construction; owned only to keep the memory alive.
    inner: Vec<u8>,
    /// Aligned start of the usable region within `inner`.
    ptr: NonNull<u8>,
    /// Usable length in bytes.
    len: usize,
    alignment: usize,
}

impl AlignedStorage {
    /// Alignment used when none is requested; at least the alignment of any
    /// fixed-width numeric type.
    pub const DEFAULT_ALIGNMENT: usize = 16;
    /// Block size for padding the allocation.
    pub const BLOCK_SIZE: usize = 16;

    /// Allocates `len` zeroed bytes starting at a multiple of `alignment`.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is not a power of two, or if the padded size
    /// overflows `usize`.
    pub fn zeroed(len: usize, alignment: usize) -> AlignedStorage {
        let alignment = alignment.max(1);
        assert!(
            alignment.is_power_of_two(),
            "alignment must be a power of two: {alignment}"
        );

        let vec_capacity = align_up(len, Self::BLOCK_SIZE)
            .checked_add(alignment)
            .expect("add");
        let mut inner = vec![0u8; vec_capacity];

        let base = inner.as_mut_ptr();
        let start = align_up(base as usize, alignment) - base as usize;
        // `start < alignment`, so the aligned region fits in the allocation.
        let ptr = unsafe { NonNull::new_unchecked(base.add(start)) };

        log::trace!(
            "allocated aligned storage: len={len}, alignment={alignment}, heap={}",
            inner.capacity()
        );

        AlignedStorage {
            inner,
            ptr,
            len,
            alignment,
        }
    }

    /// Returns the usable length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the storage holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the alignment the storage was created with.
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Returns a raw pointer to the first usable byte.
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Returns the total allocated size in bytes, including alignment and padding.
    pub fn heap_size(&self) -> usize {
        self.inner.capacity()
    }
}

impl std::fmt::Debug for AlignedStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedStorage")
            .field("len", &self.len)
            .field("alignment", &self.alignment)
            .field("heap_size", &self.heap_size())
            .finish_non_exhaustive()
    }
}

/// `Buffer` is a handle onto a contiguous, fixed-size, mutable memory region
/// with shared ownership.
///
/// Buffers can be sliced and cloned without copying the underlying data; all
/// handles onto the same [`AlignedStorage`] observe each other's writes
/// immediately. The storage is kept alive through reference counting for as
/// long as any handle exists.
///
/// Mutation goes through raw pointers, never through `&mut [u8]`, so a
/// `Buffer` is not `Send` or `Sync`: all handles onto one storage must be
/// driven from a single thread.
#[derive(Clone)]
pub struct Buffer {
    ptr: NonNull<u8>,
    len: usize,
    owner: Rc<AlignedStorage>,
}

impl Buffer {
    /// Creates a new empty buffer.
    pub fn new() -> Buffer {
        Self::zeroed(0)
    }

    /// Allocates a zero-initialized buffer of `len` bytes whose start is aligned
    /// to `alignment`.
    pub fn allocate(len: usize, alignment: usize) -> Buffer {
        Self::from_storage(AlignedStorage::zeroed(len, alignment))
    }

    /// Allocates a zero-initialized buffer of `len` bytes with the default alignment.
    pub fn zeroed(len: usize) -> Buffer {
        Self::allocate(len, AlignedStorage::DEFAULT_ALIGNMENT)
    }

    /// Creates a new buffer containing a copy of the provided slice.
    pub fn copy_from_slice(data: &[u8]) -> Buffer {
        let buf = Self::zeroed(data.len());
        unsafe {
            std::ptr::copy_nonoverlapping(data.as_ptr(), buf.as_ptr(), data.len());
        }
        buf
    }

    /// Creates a buffer that takes ownership of the provided storage.
    pub fn from_storage(storage: AlignedStorage) -> Buffer {
        let ptr = storage.ptr;
        let len = storage.len();
        Buffer {
            ptr,
            len,
            owner: Rc::new(storage),
        }
    }

    /// Returns the length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a raw pointer to the first byte of the buffer.
    ///
    /// Writes through this pointer are visible through every handle sharing
    /// the same storage. The pointer is valid for `len()` bytes while this
    /// buffer (or any clone of it) is alive.
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Copies the current contents of the buffer into a new vector.
    pub fn to_vec(&self) -> Vec<u8> {
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }.to_vec()
    }

    /// Reads a value of type `T` at the given byte offset.
    ///
    /// The offset does not have to be aligned for `T`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + size_of::<T>()` exceeds the buffer's length.
    pub fn read<T>(&self, offset: usize) -> T
    where
        T: bytemuck::Pod,
    {
        self.verify_access(offset, std::mem::size_of::<T>());
        unsafe { self.as_ptr().add(offset).cast::<T>().read_unaligned() }
    }

    /// Writes a value of type `T` at the given byte offset.
    ///
    /// # Panics
    ///
    /// Panics if `offset + size_of::<T>()` exceeds the buffer's length.
    pub fn write<T>(&self, offset: usize, value: T)
    where
        T: bytemuck::Pod,
    {
        self.verify_access(offset, std::mem::size_of::<T>());
        unsafe { self.as_ptr().add(offset).cast::<T>().write_unaligned(value) }
    }

    /// Creates a new buffer representing a subrange of this buffer.
    ///
    /// The returned buffer shares ownership of the underlying memory with the original buffer.
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - The start index is greater than the end index
    /// - The end index is greater than the buffer's length
    /// - Either index arithmetic overflows
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Buffer {
        let range = self.verify_range(range);
        self.make_slice(range)
    }

    /// Checks if the buffer is aligned to the specified alignment.
    pub fn is_aligned(&self, alignment: usize) -> bool {
        self.is_aligned_index(0, alignment)
    }

    /// Checks if the buffer is aligned to the specified alignment at the given offset.
    ///
    /// # Panics
    ///
    /// Panics if the offset is greater than the buffer's length.
    pub fn is_aligned_at(&self, offset: usize, alignment: usize) -> bool {
        assert!(offset <= self.len());
        self.is_aligned_index(offset, alignment)
    }

    /// Returns `true` if both handles refer to the same underlying storage,
    /// regardless of the subrange each one covers.
    pub fn same_storage(&self, other: &Buffer) -> bool {
        Rc::ptr_eq(&self.owner, &other.owner)
    }

    /// Returns the number of live handles on the underlying storage.
    pub fn owner_count(&self) -> usize {
        Rc::strong_count(&self.owner)
    }

    /// Returns a reference to the underlying storage.
    pub fn storage(&self) -> &AlignedStorage {
        &self.owner
    }
}

impl Buffer {
    /// Verifies that the given range is valid for this buffer.
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - The start index is greater than the end index
    /// - The end index is greater than the buffer's length
    /// - Index calculation results in arithmetic overflow
    fn verify_range(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        use core::ops::Bound;

        let len = self.len();

        let start = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n.checked_add(1).expect("out of range"),
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(&n) => n.checked_add(1).expect("out of range"),
            Bound::Excluded(&n) => n,
            Bound::Unbounded => len,
        };

        assert!(
            start <= end,
            "range start must not be greater than end: {:?} <= {:?}",
            start,
            end,
        );
        assert!(
            end <= len,
            "range end out of bounds: {:?} <= {:?}",
            end,
            len,
        );

        start..end
    }

    fn verify_access(&self, offset: usize, size: usize) {
        let end = offset.checked_add(size).expect("out of range");
        assert!(
            end <= self.len,
            "access out of bounds: {:?} <= {:?}",
            end,
            self.len,
        );
    }

    fn make_slice(&self, range: Range<usize>) -> Buffer {
        let ptr = unsafe { NonNull::new_unchecked(self.as_ptr().add(range.start)) };
        Buffer {
            ptr,
            len: range.end - range.start,
            owner: self.owner.clone(),
        }
    }

    #[inline]
    fn is_aligned_index(&self, index: usize, alignment: usize) -> bool {
        is_aligned_ptr(unsafe { self.as_ptr().add(index) }, alignment)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.to_vec().fmt(f)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AlignedStorage> for Buffer {
    fn from(storage: AlignedStorage) -> Buffer {
        Buffer::from_storage(storage)
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Buffer {
        Buffer::copy_from_slice(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert!(buf.to_vec().is_empty());
    }

    #[test]
    fn test_buffer_zeroed() {
        let len = 100;
        let buf = Buffer::zeroed(len);
        assert_eq!(buf.len(), len);
        assert!(!buf.is_empty());
        assert!(buf.to_vec().iter().all(|&x| x == 0));
        assert!(buf.is_aligned(AlignedStorage::DEFAULT_ALIGNMENT));
    }

    #[test]
    fn test_buffer_copy_from_slice() {
        let data = vec![1, 2, 3, 4, 5];
        let buf = Buffer::copy_from_slice(&data);
        assert_eq!(buf.len(), data.len());
        assert_eq!(buf.to_vec(), data);
    }

    #[test]
    fn test_buffer_slice() {
        let data = vec![1, 2, 3, 4, 5];
        let buf = Buffer::copy_from_slice(&data);

        assert_eq!(buf.slice(1..4).to_vec(), &[2, 3, 4]);
        assert_eq!(buf.slice(..3).to_vec(), &[1, 2, 3]);
        assert_eq!(buf.slice(3..).to_vec(), &[4, 5]);
        assert_eq!(buf.slice(..).to_vec(), data);
        assert!(buf.slice(2..2).is_empty());
    }

    #[test]
    #[should_panic(expected = "range end out of bounds")]
    fn test_buffer_slice_out_of_bounds() {
        let buf = Buffer::copy_from_slice(&[1, 2, 3]);
        buf.slice(1..4);
    }

    #[test]
    #[should_panic(expected = "range start must not be greater than end")]
    fn test_buffer_slice_invalid_range() {
        let buf = Buffer::copy_from_slice(&[1, 2, 3]);
        buf.slice(Range { start: 2, end: 1 });
    }

    #[test]
    fn test_buffer_slices_share_writes() {
        let buf = Buffer::zeroed(8);
        let tail = buf.slice(4..);
        tail.write::<u8>(0, 42);
        assert_eq!(buf.read::<u8>(4), 42);

        buf.write::<u16>(6, 0xBEEF);
        assert_eq!(tail.read::<u16>(2), 0xBEEF);
        assert!(buf.same_storage(&tail));
    }

    #[test]
    fn test_buffer_unaligned_read_write() {
        let buf = Buffer::zeroed(16);
        buf.write::<u32>(3, 0x0102_0304);
        assert_eq!(buf.read::<u32>(3), 0x0102_0304);
        assert_eq!(buf.read::<u8>(2), 0);
    }

    #[test]
    #[should_panic(expected = "access out of bounds")]
    fn test_buffer_write_out_of_bounds() {
        let buf = Buffer::zeroed(4);
        buf.write::<u32>(1, 7);
    }

    #[test]
    fn test_buffer_clone_shares_storage() {
        let original = Buffer::copy_from_slice(&[1, 2, 3]);
        assert_eq!(original.owner_count(), 1);

        let cloned = original.clone();
        assert_eq!(original.as_ptr(), cloned.as_ptr());
        assert_eq!(original.owner_count(), 2);
        assert!(original.same_storage(&cloned));

        drop(cloned);
        assert_eq!(original.owner_count(), 1);
        assert!(!original.same_storage(&Buffer::copy_from_slice(&[1, 2, 3])));
    }

    #[test]
    fn test_slice_outlives_original_handle() {
        let tail = {
            let buf = Buffer::copy_from_slice(&[9, 8, 7, 6]);
            buf.slice(2..)
        };
        assert_eq!(tail.owner_count(), 1);
        assert_eq!(tail.to_vec(), &[7, 6]);
    }

    #[test]
    fn test_buffer_alignment_checks() {
        let buf = Buffer::allocate(128, 64);
        assert!(buf.is_aligned(64));
        assert!(buf.is_aligned_at(32, 32));
        assert!(!buf.is_aligned_at(1, 2));
        let sliced = buf.slice(1..);
        assert!(!sliced.is_aligned(2));
        assert!(buf.slice(8..).is_aligned(8));
        assert_eq!(buf.storage().alignment(), 64);
    }

    #[test]
    fn test_storage_custom_alignments() {
        for alignment in [1, 2, 4, 8, 16, 32, 64, 128, 256] {
            for len in [0, 1, 15, 16, 17, 100] {
                let storage = AlignedStorage::zeroed(len, alignment);
                assert_eq!(storage.len(), len);
                assert!(is_aligned_ptr(storage.as_ptr(), alignment));
                assert!(storage.heap_size() >= len + alignment);
            }
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_storage_alignment_above_u32() {
        // Zeroed pages are mapped lazily, so the 4 GiB pad is never touched.
        let alignment = 1usize << 32;
        let storage = AlignedStorage::zeroed(16, alignment);
        assert_eq!(storage.alignment(), alignment);
        assert!(is_aligned_ptr(storage.as_ptr(), alignment));
        assert!(Buffer::from_storage(storage).is_aligned(alignment));
    }

    #[test]
    #[should_panic(expected = "alignment must be a power of two")]
    fn test_storage_invalid_alignment() {
        AlignedStorage::zeroed(16, 12);
    }

    #[test]
    fn test_zero_length_buffer_is_aligned() {
        let buf = Buffer::allocate(0, 8);
        assert!(buf.is_empty());
        assert!(buf.is_aligned(8));
    }

    #[test]
    fn test_buffer_debug_format() {
        let buf = Buffer::copy_from_slice(&[1, 2]);
        assert_eq!(format!("{buf:?}"), "[1, 2]");
        let storage_dbg = format!("{:?}", buf.storage());
        assert!(storage_dbg.contains("AlignedStorage"));
        assert!(storage_dbg.contains("len: 2"));
    }
}
