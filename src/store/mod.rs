//! # Resource Store
//!
//! [`ProductStore`] is the persistence contract the HTTP layer talks to. It is
//! deliberately small: list everything, create, delete by id, update by id.
//! There are no transactions, batches, or secondary indexes.
//!
//! Two implementations exist:
//!
//! - [`ProductClient`](crate::clients::ProductClient): the in-process store, a
//!   [`ResourceActor`](crate::framework::ResourceActor) owning a `HashMap`.
//! - [`RedisStore`]: JSON documents in a single Redis hash.
//!
//! [`StoreKind`] parses a `DATABASE_URL` into one of the two.

pub mod redis_store;

pub use redis_store::RedisStore;

use async_trait::async_trait;
use std::fmt::Display;
use std::str::FromStr;

use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;

/// Persistent collection of products keyed by [`ProductId`].
///
/// Failures are always one of [`ProductError::Validation`],
/// [`ProductError::NotFound`] or [`ProductError::Store`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every stored product, in no particular order.
    async fn list(&self) -> Result<Vec<Product>, ProductError>;

    /// Stores a new product under a freshly generated id.
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError>;

    /// Removes a product and returns it as it was.
    async fn delete_by_id(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Overwrites the provided fields and returns the updated product.
    async fn update_by_id(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError>;
}

/// Which backing store a connection string selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    /// `memory://`: the in-process actor store. Contents are lost on exit.
    Memory,
    /// `redis://` or `rediss://`: the Redis document store at this URL.
    Redis(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported database url scheme in `{0}` (expected memory://, redis:// or rediss://)")]
pub struct UnsupportedStoreUrl(pub String);

impl FromStr for StoreKind {
    type Err = UnsupportedStoreUrl;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let url = url.trim();
        match url.split_once("://") {
            Some(("memory", _)) => Ok(StoreKind::Memory),
            Some(("redis" | "rediss", _)) => Ok(StoreKind::Redis(url.to_string())),
            _ => Err(UnsupportedStoreUrl(url.to_string())),
        }
    }
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Memory => write!(f, "memory"),
            StoreKind::Redis(_) => write!(f, "redis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_schemes() {
        assert_eq!("memory://".parse::<StoreKind>(), Ok(StoreKind::Memory));
        assert_eq!(
            "redis://localhost:6379/0".parse::<StoreKind>(),
            Ok(StoreKind::Redis("redis://localhost:6379/0".into()))
        );
        assert!(matches!(
            "rediss://cache.internal".parse::<StoreKind>(),
            Ok(StoreKind::Redis(_))
        ));
    }

    #[test]
    fn rejects_other_schemes() {
        assert!("mongodb://localhost/shop".parse::<StoreKind>().is_err());
        assert!("localhost:6379".parse::<StoreKind>().is_err());
    }

    #[test]
    fn display_hides_credentials() {
        let kind = StoreKind::Redis("redis://:secret@db:6379".into());
        assert_eq!(kind.to_string(), "redis");
    }
}
