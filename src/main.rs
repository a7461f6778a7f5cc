//! # Product Catalog Server
//!
//! Entry point. Reads [`Config`] from the environment, opens the store,
//! serves the HTTP API until Ctrl+C or SIGTERM, then stops the store.

use product_catalog::api::{self, AppState};
use product_catalog::lifecycle::{bind, serve, setup_tracing, shutdown_signal, CatalogSystem, Config};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::load().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;

    info!(store = %config.store, port = config.port, "Starting product catalog");

    let system = CatalogSystem::start(&config.store).await.map_err(|e| {
        error!(error = %e, "Failed to open store");
        e.to_string()
    })?;

    if let Some(dir) = &config.frontend_dir {
        info!(dir = %dir.display(), "Serving frontend");
    }
    let app = api::router(AppState::new(system.store.clone()), config.frontend_dir.as_deref());

    let listener = bind(config.port).await.map_err(|e| {
        error!(error = %e, port = config.port, "Failed to bind");
        e.to_string()
    })?;

    serve(listener, app, shutdown_signal())
        .await
        .map_err(|e| e.to_string())?;

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Server stopped");
    Ok(())
}
