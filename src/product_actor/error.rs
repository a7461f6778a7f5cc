//! Error types for product operations.

use thiserror::Error;

/// Errors that can occur during product operations.
///
/// Every store implementation reports failures through this type, so the HTTP
/// layer maps exactly three outcomes to status codes.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// Required input is missing or the merged record breaks a required-field rule.
    #[error("Product validation failed: {0}")]
    Validation(String),

    /// No product matches the requested id.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Any other persistence or connectivity failure.
    #[error("Product store error: {0}")]
    Store(String),
}

impl From<redis::RedisError> for ProductError {
    fn from(e: redis::RedisError) -> Self {
        ProductError::Store(e.to_string())
    }
}

impl From<serde_json::Error> for ProductError {
    fn from(e: serde_json::Error) -> Self {
        ProductError::Store(format!("corrupt product document: {e}"))
    }
}
