//! Core definitions shared by all vista-* crates.

pub mod error;
pub mod result;

pub use result::Result;
