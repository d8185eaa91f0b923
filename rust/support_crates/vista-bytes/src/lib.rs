//! Raw storage backing the numeric views: fixed-size, zero-initialized, aligned
//! byte regions with shared ownership.
//!
//! A [`Buffer`] is a cheap handle onto an [`AlignedStorage`](buffer::AlignedStorage).
//! Cloning or slicing a buffer never copies; the storage is released when the
//! last handle goes away.

pub mod align;
pub mod buffer;

pub use buffer::{AlignedStorage, Buffer};
