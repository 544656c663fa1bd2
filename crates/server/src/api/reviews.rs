use axum::Json;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use bazaar_core::{ProductId, ReviewId};

use super::AppState;
use super::identity::Identity;
use crate::error::ApiError;

/// Body of a review upsert.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub product_id: String,
    pub rating: u8,
    pub comment: String,
}

/// Query parameters for listing a product's reviews.
#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    /// The product id.
    pub id: String,
}

/// Query parameters for deleting a review.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewQuery {
    pub product_id: String,
    /// The review id.
    pub id: String,
}

/// `PUT /api/v1/review` -- create or update the caller's review.
pub async fn upsert_review(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Json(payload): Json<ReviewRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .reviews
        .upsert(
            &ProductId::new(payload.product_id),
            &caller,
            payload.rating,
            payload.comment,
        )
        .await?;
    Ok(Json(json!({
        "success": true,
        "ratings": product.ratings,
        "numOfReviews": product.num_of_reviews,
    })))
}

/// `GET /api/v1/reviews?id={productId}` -- the product's review list.
pub async fn get_product_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = state.reviews.list(&ProductId::new(query.id)).await?;
    Ok(Json(json!({ "success": true, "reviews": reviews })))
}

/// `DELETE /api/v1/reviews?productId={..}&id={reviewId}` -- remove a
/// review; unknown review ids are a successful no-op.
pub async fn delete_review(
    State(state): State<AppState>,
    Identity(_caller): Identity,
    Query(query): Query<DeleteReviewQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .reviews
        .delete(
            &ProductId::new(query.product_id),
            &ReviewId::new(query.id),
        )
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Review deleted successfully",
        "ratings": product.ratings,
        "numOfReviews": product.num_of_reviews,
    })))
}
