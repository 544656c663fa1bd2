use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bazaar_core::{CreateProduct, ProductId, UpdateProduct};

use super::AppState;
use super::identity::Identity;
use crate::error::ApiError;

/// `POST /api/v1/admin/product` -- create a product owned by the caller.
pub async fn create_product(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(payload): Json<CreateProduct>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.products.create(&caller, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": product })),
    ))
}

/// `GET /api/v1/products` -- all products with a total count.
pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.products.list().await?;
    Ok(Json(json!({
        "success": true,
        "productCount": products.len(),
        "products": products,
    })))
}

/// `GET /api/v1/product/{id}` -- a single product.
pub async fn get_product_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.products.get(&ProductId::new(id)).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// `PUT /api/v1/admin/product/{id}` -- partial update; a provided
/// `images` field replaces the whole image set.
pub async fn update_product(
    State(state): State<AppState>,
    Identity(_caller): Identity,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProduct>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state.products.update(&ProductId::new(id), payload).await?;
    Ok(Json(json!({ "success": true, "product": product })))
}

/// `DELETE /api/v1/admin/product/{id}` -- delete the product and release
/// its image assets.
pub async fn delete_product(
    State(state): State<AppState>,
    Identity(_caller): Identity,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let destroyed = state.products.delete(&ProductId::new(id)).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Product deleted successfully",
        "assetsDestroyed": destroyed,
    })))
}
