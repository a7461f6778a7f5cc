//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Output uses the compact format without module paths (`with_target(false)`);
//! the store actor tags its events with `entity_type` instead.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: actor startup and shutdown with the final record count
//! - **Store operations**: List, Create, Update, Delete with the product id
//! - **HTTP requests**: one span per request from `tower_http::trace::TraceLayer`
//! - **Failures**: store errors with their full cause, logged before the 500 reply
//!
//! ## Usage Examples
//!
//! ```bash
//! # Request and store events
//! RUST_LOG=info cargo run
//!
//! # Full payloads and per-request spans
//! RUST_LOG=debug,tower_http=debug cargo run
//!
//! # Only the in-process store
//! RUST_LOG=product_catalog::framework=debug cargo run
//! ```
//!
//! **With `RUST_LOG=info`**, creating and deleting a product prints:
//!
//! ```text
//! INFO Actor started entity_type="Product"
//! INFO Created entity_type="Product" id=9b6c… size=1
//! INFO Deleted entity_type="Product" id=9b6c… size=0
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
