//! # Product Actor
//!
//! The in-process backing for the product catalog: a [`ResourceActor`] that owns
//! every [`Product`] in a `HashMap` and serializes access through its channel.
//!
//! ## Structure
//!
//! - [`entity`] - [`ResourceEntity`](crate::framework::ResourceEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`], the error type shared by every store
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use product_catalog::clients::ProductClient;
//! use product_catalog::model::ProductCreate;
//! use product_catalog::product_actor;
//! use product_catalog::store::ProductStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new();
//!     tokio::spawn(actor.run());
//!
//!     let desk = client
//!         .create(ProductCreate {
//!             name: "Desk".to_string(),
//!             price: 120.0,
//!             image: "http://x/d.png".to_string(),
//!         })
//!         .await?;
//!
//!     assert_eq!(client.list().await?.len(), 1);
//!     client.delete_by_id(desk.id).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::{Product, ProductId};

/// Creates a new Product actor and its client.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(32, ProductId::new);
    let client = ProductClient::new(generic_client);

    (actor, client)
}
