//! Pure data structures: the stored [`Product`] record and its payloads.

pub mod product;

pub use product::*;
