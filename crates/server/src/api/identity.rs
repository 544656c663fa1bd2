use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bazaar_core::Caller;

/// Caller identity extracted from trusted headers.
///
/// Authentication itself happens upstream; by the time a request reaches
/// this API the `x-user-id` and `x-user-name` headers carry the verified
/// identity, which the catalog services use verbatim. A request without
/// `x-user-id` never reaches a mutating handler.
pub struct Identity(pub Caller);

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty());

        let Some(id) = id else {
            return Err((
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({
                    "success": false,
                    "error": "missing x-user-id header",
                })),
            )
                .into_response());
        };

        let name = parts
            .headers
            .get("x-user-name")
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .unwrap_or(id);

        Ok(Self(Caller::new(id, name)))
    }
}
