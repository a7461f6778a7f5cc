//! # Product Catalog
//!
//! A small HTTP service keeping a catalog of products (name, price, image URL)
//! with list, create, update and delete over JSON.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Interface ([`api`])
//! Axum routes under `/api/products`, the response [`Envelope`](api::Envelope)
//! and the mapping from failures to status codes ([`ApiError`](api::ApiError)).
//!
//! ### 2. The Contract ([`store`])
//! [`ProductStore`](store::ProductStore) is everything the routes need from
//! persistence. [`RedisStore`](store::RedisStore) keeps products in Redis.
//!
//! ### 3. The Engine ([`framework`], [`product_actor`], [`clients`])
//! The default store is in-process: a generic
//! [`ResourceActor`](framework::ResourceActor) owns the products and processes
//! one request at a time, so concurrent updates never interleave.
//! [`ProductClient`](clients::ProductClient) implements `ProductStore` on top of it.
//!
//! ### 4. The Data ([`model`])
//! [`Product`](model::Product) and its create/update payloads.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! Configuration, logging, opening and closing the store, and the server loop.
//! See the [`lifecycle::tracing`] module for log filtering.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # In-memory store on port 5001
//! RUST_LOG=info cargo run
//!
//! # Redis store
//! DATABASE_URL=redis://127.0.0.1:6379 PORT=8080 cargo run
//! ```

pub mod api;
pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod store;
