use std::sync::Arc;

use tracing::{error, info};

use crate::product_actor::{self, ProductError};
use crate::store::{ProductStore, RedisStore, StoreKind};

/// Owns the product store for the lifetime of the process.
///
/// `CatalogSystem` is responsible for:
/// - **Store Selection**: Opening the backend named by [`StoreKind`]
/// - **Lifecycle Management**: Spawning the in-process store actor and stopping it again
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::start(&StoreKind::Memory).await?;
///
/// let app = api::router(AppState::new(system.store.clone()), None);
/// // ... serve `app` ...
///
/// // Every clone of `system.store` must be gone before shutdown
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// The store handed to the HTTP layer
    pub store: Arc<dyn ProductStore>,

    /// Task handles for running actors (empty for external stores)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Opens the configured store.
    ///
    /// For [`StoreKind::Redis`] the connection is established and checked
    /// before this returns, so an unreachable server fails startup.
    pub async fn start(kind: &StoreKind) -> Result<Self, ProductError> {
        match kind {
            StoreKind::Memory => Ok(Self::in_memory()),
            StoreKind::Redis(url) => {
                let store = RedisStore::connect(url).await?;
                info!(store = %kind, "Connected to store");
                Ok(Self {
                    store: Arc::new(store),
                    handles: Vec::new(),
                })
            }
        }
    }

    /// Spawns the in-process store actor.
    pub fn in_memory() -> Self {
        let (actor, client) = product_actor::new();
        let handle = tokio::spawn(actor.run());

        Self {
            store: Arc::new(client),
            handles: vec![handle],
        }
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping the last store handle closes the actor's channel; the actor
    /// then leaves its loop and its task completes. This waits for that.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if every actor shut down cleanly
    /// - `Err(String)` if an actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.store);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
