//! Fixed-width numeric views over shared, aligned memory buffers.
//!
//! A [`View`] is a bounds-checked window of elements of one numeric kind over
//! a [`Buffer`](vista_bytes::Buffer). One generic implementation serves every
//! kind; the kind itself (see [`element`]) decides width, store behavior and
//! default ordering at compile time. The concrete view types are aliases:
//!
//! | Alias | Element | Store |
//! |---|---|---|
//! | [`Int8Array`] / [`Uint8Array`] | `i8` / `u8` | raw |
//! | [`Uint8ClampedArray`] | `u8` | saturating from `i32` |
//! | [`Int16Array`] / [`Uint16Array`] | `i16` / `u16` | raw |
//! | [`Int32Array`] / [`Uint32Array`] | `i32` / `u32` | raw |
//! | [`Int64Array`] / [`Uint64Array`] | `i64` / `u64` | raw |
//! | [`Float32Array`] / [`Float64Array`] | `f32` / `f64` | raw |
//!
//! ```
//! use vista_views::Int32Array;
//!
//! let view = Int32Array::from_slice(&[3, 1, 2]);
//! let tail = view.subarray_from(1);
//! tail.sort();
//! assert_eq!(view.to_vec(), vec![3, 1, 2]);
//! tail.set(0, 10).unwrap();
//! assert_eq!(view.get(1).unwrap(), 10);
//! assert!(view.get(3).is_err());
//! ```

pub mod element;
mod ops;
mod traversal;
mod view;


pub use element::{
    Element, Float32, Float64, Int8, Int16, Int32, Int64, Uint8, Uint8Clamped, Uint16, Uint32,
    Uint64,
};
pub use traversal::Iter;
pub use view::View;

macro_rules! define_views {
    ($($Kind:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!("A view of [`", stringify!($Kind), "`] elements.")]
                pub type [<$Kind Array>] = View<$Kind>;
            )*
        }
    };
}

define_views!(
    Int8,
    Uint8,
    Uint8Clamped,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
);
