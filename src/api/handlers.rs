//! Route handlers for `/api/products`.
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{envelope::Envelope, error::ApiError, AppState};
use crate::model::{Product, ProductCreate, ProductDraft, ProductId, ProductUpdate, MISSING_FIELDS};

/// An id that does not parse cannot name a stored product.
fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Product>>>, ApiError> {
    let products = state.store.list().await?;
    Ok(Json(Envelope::success(products)))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Product>>), ApiError> {
    let Json(draft) = payload?;
    let params = ProductCreate::try_from(draft)
        .map_err(|_| ApiError::BadRequest(MISSING_FIELDS.to_string()))?;

    let product = state.store.create(params).await?;
    info!(id = %product.id, name = %product.name, "Product created");

    let message = format!("Product {} created successfully", product.name);
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(product).with_message(message)),
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> Result<Json<Envelope<Product>>, ApiError> {
    let id = parse_id(&id)?;
    let Json(update) = payload?;

    let product = state.store.update_by_id(id, update).await?;
    info!(%id, "Product updated");

    let message = format!("Product {} updated successfully", product.name);
    Ok(Json(Envelope::success(product).with_message(message)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let id = parse_id(&id)?;

    let product = state.store.delete_by_id(id).await?;
    info!(%id, "Product deleted");

    Ok(Json(Envelope::message(format!(
        "Product {} deleted successfully",
        product.name
    ))))
}
