//! Generic resource framework behind the in-process store.
//!
//! This module provides the building blocks for a type-safe, actor-backed
//! collection of records with list/create/update/delete operations.
//!
//! # Main Components
//!
//! - [`ResourceEntity`] - Trait that record types implement to be managed by an actor
//! - [`ResourceActor`] - Generic actor that owns the records
//! - [`ResourceClient`] - Typed, cloneable handle for sending requests
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use core::*;
