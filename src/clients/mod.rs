//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod product_client;

pub use product_client::*;
