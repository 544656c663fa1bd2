use thiserror::Error;

use bazaar_assets::AssetError;
use bazaar_core::{InvalidImages, ProductId};
use bazaar_store::StoreError;

/// Errors surfaced by the catalog lifecycle services.
///
/// Every variant bubbles to the caller; nothing is silently absorbed.
/// The API layer maps `Validation` to a client error, `NotFound` to a
/// not-found response, and the rest to server errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed or missing required input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// A compare-and-swap write kept losing to concurrent writers.
    #[error("concurrent update conflict on product {id} after {retries} retries")]
    Conflict { id: ProductId, retries: u32 },

    /// An asset store upload or destroy failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A repository operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<InvalidImages> for CatalogError {
    fn from(err: InvalidImages) -> Self {
        Self::Validation(err.to_string())
    }
}
