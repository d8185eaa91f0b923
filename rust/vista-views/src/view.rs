//! The generic view handle: construction, addressing and bounds-checked access.

use std::marker::PhantomData;

use vista_bytes::{AlignedStorage, Buffer};
use vista_common::{Result, error::Error, verify_arg};

use crate::element::Element;

/// A fixed-length window of `K::Native` elements over a shared [`Buffer`].
///
/// A view holds an owning handle on its buffer, so the memory it addresses
/// stays alive for as long as the view does. Several views may alias the same
/// bytes (see [`View::subarray`]); a store through one of them is immediately
/// visible through all the others.
///
/// All mutating operations take `&self`: the view is a handle, not the owner
/// of the elements, and callbacks handed to the traversal methods receive the
/// view they iterate over and may store through it. Like [`Buffer`], a view is
/// neither `Send` nor `Sync`.
pub struct View<K: Element> {
    /// Owning reference to the backing buffer.
    buffer: Buffer,
    /// Address of element 0.
    data_start: *mut u8,
    /// Size of the window in bytes, always a multiple of `K::BYTES_PER_ELEMENT`.
    byte_length: usize,
    _kind: PhantomData<K>,
}

impl<K: Element> View<K> {
    /// Width of one element in bytes.
    pub const BYTES_PER_ELEMENT: usize = K::BYTES_PER_ELEMENT;

    /// Creates a view of `length` zeroed elements over a freshly allocated buffer.
    ///
    /// The buffer is aligned to at least [`AlignedStorage::DEFAULT_ALIGNMENT`], so
    /// views of any other kind can later be laid over it.
    ///
    /// # Panics
    ///
    /// Panics if the byte size of `length` elements overflows `usize`.
    pub fn new(length: usize) -> View<K> {
        let byte_length = length
            .checked_mul(K::BYTES_PER_ELEMENT)
            .expect("capacity overflow");
        let alignment = AlignedStorage::DEFAULT_ALIGNMENT.max(std::mem::align_of::<K::Native>());
        let buffer = Buffer::allocate(byte_length, alignment);
        let data_start = buffer.as_ptr();
        View {
            buffer,
            data_start,
            byte_length,
            _kind: PhantomData,
        }
    }

    /// Creates a view over a fresh buffer holding a copy of `values`.
    pub fn from_slice(values: &[K::Native]) -> View<K> {
        let view = Self::new(values.len());
        let bytes: &[u8] = bytemuck::cast_slice(values);
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), view.data_start, bytes.len());
        }
        view
    }

    /// Creates a view of `length` elements over an existing buffer, starting
    /// `byte_offset` bytes into it.
    ///
    /// Fails with `InvalidArgument` if the window does not fit in the buffer or
    /// if its start is not aligned for `K::Native`.
    pub fn with_buffer(buffer: Buffer, byte_offset: usize, length: usize) -> Result<View<K>> {
        let byte_length = length.checked_mul(K::BYTES_PER_ELEMENT);
        let end = byte_length.and_then(|len| byte_offset.checked_add(len));
        verify_arg!(length, end.is_some_and(|end| end <= buffer.len()));
        verify_arg!(
            byte_offset,
            buffer.is_aligned_at(byte_offset, std::mem::align_of::<K::Native>())
        );

        let data_start = unsafe { buffer.as_ptr().add(byte_offset) };
        Ok(View {
            buffer,
            data_start,
            byte_length: length << K::ALIGN_SHIFT,
            _kind: PhantomData,
        })
    }

    /// Creates a view covering the whole of an existing buffer.
    ///
    /// Fails with `InvalidArgument` if the buffer length is not a whole number
    /// of elements or its start is not aligned for `K::Native`.
    pub fn from_buffer(buffer: Buffer) -> Result<View<K>> {
        verify_arg!(buffer, buffer.len() % K::BYTES_PER_ELEMENT == 0);
        let length = buffer.len() >> K::ALIGN_SHIFT;
        Self::with_buffer(buffer, 0, length)
    }

    /// Returns the backing buffer.
    #[inline]
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Returns the offset of element 0 from the start of the backing buffer, in bytes.
    #[inline]
    pub fn byte_offset(&self) -> usize {
        self.data_start as usize - self.buffer.as_ptr() as usize
    }

    /// Returns the size of the window in bytes.
    #[inline]
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.byte_length >> K::ALIGN_SHIFT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.byte_length == 0
    }

    /// Returns the element at `index`.
    ///
    /// Fails with `IndexOutOfBounds` for a negative index or one at or past
    /// `len()`; nothing is read in that case.
    #[inline]
    pub fn get(&self, index: isize) -> Result<K::Native> {
        // Negative indices wrap to huge unsigned values, so one comparison
        // covers both ends of the range.
        if index as usize >= self.len() {
            return Err(Error::index_out_of_bounds(index, self.len()));
        }
        Ok(unsafe { self.load(index as usize) })
    }

    /// Stores `value` at `index`, converting it with `K::encode`.
    ///
    /// Fails with `IndexOutOfBounds` for a negative index or one at or past
    /// `len()`; nothing is written in that case.
    #[inline]
    pub fn set(&self, index: isize, value: K::Input) -> Result<()> {
        if index as usize >= self.len() {
            return Err(Error::index_out_of_bounds(index, self.len()));
        }
        unsafe { self.store(index as usize, K::encode(value)) };
        Ok(())
    }

    /// Returns the element at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> K::Native {
        debug_assert!(index < self.len());
        unsafe { self.load(index) }
    }

    /// Stores `value` at `index` without a bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn set_unchecked(&self, index: usize, value: K::Input) {
        debug_assert!(index < self.len());
        unsafe { self.store(index, K::encode(value)) }
    }

    /// Copies the current elements into a new vector.
    pub fn to_vec(&self) -> Vec<K::Native> {
        (0..self.len()).map(|i| unsafe { self.load(i) }).collect()
    }

    /// Returns `true` if both views are backed by the same storage.
    pub fn shares_buffer_with<U: Element>(&self, other: &View<U>) -> bool {
        self.buffer.same_storage(&other.buffer)
    }
}

impl<K: Element> View<K> {
    /// Address of the element at `index`.
    #[inline]
    pub(crate) fn element_ptr(&self, index: usize) -> *mut K::Native {
        unsafe { self.data_start.add(index << K::ALIGN_SHIFT).cast() }
    }

    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub(crate) unsafe fn load(&self, index: usize) -> K::Native {
        unsafe { self.element_ptr(index).read() }
    }

    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub(crate) unsafe fn store(&self, index: usize, value: K::Native) {
        unsafe { self.element_ptr(index).write(value) }
    }

    /// Builds a view over `byte_length` bytes of this view's buffer starting
    /// at `data_start`.
    ///
    /// The caller guarantees the range lies within this view's window.
    #[inline]
    pub(crate) fn alias(&self, data_start: *mut u8, byte_length: usize) -> View<K> {
        View {
            buffer: self.buffer.clone(),
            data_start,
            byte_length,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn data_start(&self) -> *mut u8 {
        self.data_start
    }
}

impl<K: Element> Clone for View<K> {
    /// Returns a new handle over the same window; no elements are copied.
    fn clone(&self) -> Self {
        self.alias(self.data_start, self.byte_length)
    }
}

impl<K: Element> std::fmt::Debug for View<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(K::NAME).field(&self.to_vec()).finish()
    }
}

impl<K: Element> Default for View<K> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K: Element> From<&[K::Native]> for View<K> {
    fn from(values: &[K::Native]) -> Self {
        Self::from_slice(values)
    }
}
