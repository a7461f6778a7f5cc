//! ResourceEntity trait implementation for the Product domain type.
//!
//! This module contains the [`ResourceEntity`] trait implementation
//! that enables [`Product`] to be managed by the generic [`crate::framework::ResourceActor`].
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::error::ProductError;
use crate::framework::ResourceEntity;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};

impl ResourceEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        Ok(Self::from_params(id, params))
    }

    /// Rejects records that would break the required-field rules.
    fn on_create(&mut self) -> Result<(), ProductError> {
        self.validate()
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `name`, `price`, `image`: replaced when present in the update
    /// - `updated_at`: refreshed on success
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        self.apply(update)
    }
}
