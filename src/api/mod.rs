//! # HTTP API
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `GET` | `/api/products` | 200, `data` is every product |
//! | `POST` | `/api/products` | 201, `data` is the new product |
//! | `PUT` | `/api/products/:id` | 200, `data` is the updated product |
//! | `DELETE` | `/api/products/:id` | 200, message only |
//!
//! Every body is an [`Envelope`]. Failures are described in [`ApiError`].
//! When a frontend directory is configured, any other path serves a file from
//! it, falling back to its `index.html`.

pub mod envelope;
pub mod error;
pub mod handlers;

pub use envelope::Envelope;
pub use error::ApiError;

use std::{path::Path, sync::Arc};

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::store::ProductStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState, frontend_dir: Option<&Path>) -> Router {
    let products = Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:id", put(handlers::update_product).delete(handlers::delete_product));

    let mut app = Router::new().nest("/api/products", products);

    if let Some(dir) = frontend_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
