use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bazaar_core::CreateListing;

use super::AppState;
use super::identity::Identity;
use crate::error::ApiError;

/// `POST /api/v1/sellproduct` -- create a sell listing owned by the caller.
pub async fn create_listing(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(payload): Json<CreateListing>,
) -> Result<impl IntoResponse, ApiError> {
    let listing = state.listings.create(&caller, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "product": listing })),
    ))
}

/// `GET /api/v1/sellproducts` -- all sell listings.
pub async fn get_all_listings(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let listings = state.listings.list().await?;
    Ok(Json(json!({ "success": true, "products": listings })))
}
