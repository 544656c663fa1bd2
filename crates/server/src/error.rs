use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use bazaar_catalog::CatalogError;

/// Errors that can occur when starting the Bazaar server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Catalog error surfaced through an API handler.
///
/// One mapping for the whole API: validation failures are client errors,
/// missing products are not-found, lost compare-and-swap races are
/// conflicts, and backend failures are server errors.
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Conflict { .. } => StatusCode::CONFLICT,
            CatalogError::Asset(_) => StatusCode::BAD_GATEWAY,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            axum::Json(json!({
                "success": false,
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
