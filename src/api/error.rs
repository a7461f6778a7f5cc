use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use super::envelope::Envelope;
use crate::product_actor::ProductError;

pub const NOT_FOUND: &str = "Product not found";
pub const SERVER_ERROR: &str = "Server Error";
pub const INVALID_BODY: &str = "Invalid request body";

/// Failure of a request, rendered as a `success: false` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", NOT_FOUND)]
    NotFound,

    /// The detail is logged, never sent to the client.
    #[error("{}", SERVER_ERROR)]
    Internal(String),
}

impl From<ProductError> for ApiError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::Validation(_) => ApiError::BadRequest(e.to_string()),
            ProductError::NotFound(_) => ApiError::NotFound,
            ProductError::Store(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(detail = %rejection.body_text(), "Unreadable request body");
        ApiError::BadRequest(INVALID_BODY.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(reason) => {
                warn!(%reason, "Rejected request");
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(detail) => {
                error!(%detail, "Store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(Envelope::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_errors_map_to_statuses() {
        let cases = [
            (ProductError::Validation("name is required".into()), StatusCode::BAD_REQUEST),
            (ProductError::NotFound("42".into()), StatusCode::NOT_FOUND),
            (ProductError::Store("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (product_error, status) in cases {
            assert_eq!(ApiError::from(product_error).into_response().status(), status);
        }
    }

    #[test]
    fn store_detail_stays_private() {
        let e = ApiError::from(ProductError::Store("password=hunter2".into()));
        assert_eq!(e.to_string(), SERVER_ERROR);
    }

    #[test]
    fn validation_reason_is_reported() {
        let e = ApiError::from(ProductError::Validation("image is required".into()));
        assert_eq!(e.to_string(), "Product validation failed: image is required");
    }
}
