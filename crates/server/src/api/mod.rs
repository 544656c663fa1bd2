pub mod health;
pub mod identity;
pub mod listings;
pub mod products;
pub mod reviews;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use bazaar_catalog::{ListingService, ProductService, ReviewService};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub reviews: Arc<ReviewService>,
    pub listings: Arc<ListingService>,
}

/// Build the Axum router with all API routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Products
        .route("/api/v1/products", get(products::get_all_products))
        .route("/api/v1/product/{id}", get(products::get_product_details))
        .route("/api/v1/admin/product", post(products::create_product))
        .route("/api/v1/admin/product/{id}", put(products::update_product))
        .route(
            "/api/v1/admin/product/{id}",
            delete(products::delete_product),
        )
        // Reviews
        .route("/api/v1/review", put(reviews::upsert_review))
        .route("/api/v1/reviews", get(reviews::get_product_reviews))
        .route("/api/v1/reviews", delete(reviews::delete_review))
        // Sell listings
        .route("/api/v1/sellproduct", post(listings::create_listing))
        .route("/api/v1/sellproducts", get(listings::get_all_listings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
