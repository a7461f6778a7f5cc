//! # Redis Document Store
//!
//! Each product is a JSON document stored as one field of a single Redis hash,
//! keyed by its id.
//!
//! ## Layout
//!
//! - Hash key: `products` (overridable with [`RedisStore::with_key`])
//! - Field: the product id
//! - Value: the product serialized with `serde_json`
//!
//! ## Atomicity
//!
//! - Delete runs `HGET` + `HDEL` in one `MULTI` transaction, so the returned
//!   document is exactly the one removed.
//! - Update reads the document, merges and validates it in process, then writes it
//!   back with a Lua compare-and-set. The write only happens if the stored
//!   document is byte-for-byte the one that was read. When another update got
//!   there first the whole read-merge-write is retried, up to
//!   [`MAX_UPDATE_ATTEMPTS`] times. A concurrent delete surfaces as `NotFound`.
//!
//! ## Commands
//!
//! Inspect the collection.
//! ```sh
//! redis-cli HVALS products
//! ```
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client, Script};
use tracing::{debug, info, instrument};

use super::ProductStore;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;

pub const PRODUCTS_KEY: &str = "products";

/// Read-merge-write rounds before an update under contention gives up.
pub const MAX_UPDATE_ATTEMPTS: usize = 64;

/// Returns 1 on write, 0 if the field is gone, -1 if it changed since it was read.
const REPLACE_IF_UNCHANGED: &str = r"
local current = redis.call('HGET', KEYS[1], ARGV[1])
if not current then
    return 0
end
if current ~= ARGV[2] then
    return -1
end
redis.call('HSET', KEYS[1], ARGV[1], ARGV[3])
return 1
";

/// Result of one compare-and-set write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replace {
    Written,
    Missing,
    Changed,
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
    key: String,
    replace: Script,
}

impl RedisStore {
    /// Opens a managed connection and checks it with `PING`.
    ///
    /// Fails if the server is unreachable, which aborts startup.
    pub async fn connect(redis_url: &str) -> Result<Self, ProductError> {
        let client = Client::open(redis_url)?;
        let mut connection = client.get_connection_manager().await?;

        let pong: String = redis::cmd("PING").query_async(&mut connection).await?;
        info!(%pong, "Connected to redis");

        Ok(Self {
            connection,
            key: PRODUCTS_KEY.to_string(),
            replace: Script::new(REPLACE_IF_UNCHANGED),
        })
    }

    /// Stores products under a different hash key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Writes `next` into `field` only if it still holds `current`.
    async fn replace_if_unchanged(&self, field: &str, current: &str, next: &str) -> Result<Replace, ProductError> {
        let mut connection = self.connection.clone();
        let outcome: i64 = self
            .replace
            .key(&self.key)
            .arg(field)
            .arg(current)
            .arg(next)
            .invoke_async(&mut connection)
            .await?;

        Ok(match outcome {
            1 => Replace::Written,
            0 => Replace::Missing,
            _ => Replace::Changed,
        })
    }
}

#[async_trait]
impl ProductStore for RedisStore {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, ProductError> {
        let mut connection = self.connection.clone();
        let documents: Vec<String> = connection.hvals(&self.key).await?;
        debug!(count = documents.len(), "Loaded product documents");

        documents
            .iter()
            .map(|doc| serde_json::from_str(doc).map_err(ProductError::from))
            .collect()
    }

    #[instrument(skip(self))]
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError> {
        let product = Product::from_params(ProductId::new(), params);
        product.validate()?;

        let document = serde_json::to_string(&product)?;
        let mut connection = self.connection.clone();
        let inserted: bool = connection
            .hset_nx(&self.key, product.id.to_string(), document)
            .await?;
        if !inserted {
            return Err(ProductError::Store(format!("id collision on {}", product.id)));
        }

        info!(id = %product.id, "Created");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ProductId) -> Result<Product, ProductError> {
        let field = id.to_string();
        let mut connection = self.connection.clone();

        let (document, _removed): (Option<String>, i64) = redis::pipe()
            .atomic()
            .hget(&self.key, &field)
            .hdel(&self.key, &field)
            .query_async(&mut connection)
            .await?;

        let document = document.ok_or(ProductError::NotFound(field))?;
        let product: Product = serde_json::from_str(&document)?;
        info!(id = %product.id, "Deleted");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn update_by_id(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        let field = id.to_string();
        let mut connection = self.connection.clone();

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let current: Option<String> = connection.hget(&self.key, &field).await?;
            let current = current.ok_or_else(|| ProductError::NotFound(field.clone()))?;

            let mut product: Product = serde_json::from_str(&current)?;
            product.apply(update.clone())?;
            let next = serde_json::to_string(&product)?;

            match self.replace_if_unchanged(&field, &current, &next).await? {
                Replace::Written => {
                    info!(id = %product.id, attempt, "Updated");
                    return Ok(product);
                }
                Replace::Missing => return Err(ProductError::NotFound(field)),
                Replace::Changed => debug!(attempt, "Product changed while updating, retrying"),
            }
        }

        Err(ProductError::Store(format!(
            "product {field} kept changing over {MAX_UPDATE_ATTEMPTS} update attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Connects to `REDIS_URL` under a fresh hash key, or `None` when unset.
    async fn test_store() -> Option<RedisStore> {
        let url = std::env::var("REDIS_URL").ok()?;
        let store = RedisStore::connect(&url).await.expect("Failed to connect to redis");
        Some(store.with_key(format!("products-test-{}", ProductId::new())))
    }

    fn desk() -> ProductCreate {
        ProductCreate {
            name: "Desk".to_string(),
            price: 120.0,
            image: "http://x/d.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_replace_reports_changed_document() {
        let Some(store) = test_store().await else { return };
        let product = store.create(desk()).await.unwrap();
        let field = product.id.to_string();

        let current = serde_json::to_string(&product).unwrap();
        let outcome = store
            .replace_if_unchanged(&field, "stale document", &current)
            .await
            .unwrap();
        assert_eq!(outcome, Replace::Changed);

        let outcome = store.replace_if_unchanged(&field, &current, &current).await.unwrap();
        assert_eq!(outcome, Replace::Written);
    }

    #[tokio::test]
    async fn test_replace_reports_deleted_document() {
        let Some(store) = test_store().await else { return };
        let product = store.create(desk()).await.unwrap();
        let current = serde_json::to_string(&product).unwrap();
        store.delete_by_id(product.id).await.unwrap();

        let outcome = store
            .replace_if_unchanged(&product.id.to_string(), &current, &current)
            .await
            .unwrap();
        assert_eq!(outcome, Replace::Missing);
        assert!(store.list().await.unwrap().is_empty());
    }
}
