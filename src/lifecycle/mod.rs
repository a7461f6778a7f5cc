//! Process wiring: configuration, logging, the store's lifetime and the HTTP server.

pub mod catalog_system;
pub mod config;
pub mod server;
pub mod tracing;

pub use catalog_system::CatalogSystem;
pub use config::{Config, ConfigError};
pub use server::{bind, serve, shutdown_signal};
pub use self::tracing::setup_tracing;
