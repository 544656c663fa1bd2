use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AssetId, ProductId, ReviewId, UserId};

/// Lowest rating a review may carry.
pub const MIN_RATING: u8 = 1;
/// Highest rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// Reference to an image held by the external asset store.
///
/// Each entry is owned exclusively by one product: replacing or deleting
/// the product is responsible for destroying the underlying asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Store-assigned asset identifier.
    pub asset_id: AssetId,
    /// Retrievable URL for the asset.
    pub url: String,
}

/// A single product review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Identifier assigned when the review is first inserted.
    pub id: ReviewId,
    /// The reviewing user (not owned by the product).
    pub user: UserId,
    /// Snapshot of the reviewer's display name at submission time.
    pub name: String,
    /// Rating in `MIN_RATING..=MAX_RATING`.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
}

/// A catalog product with its embedded reviews and derived aggregates.
///
/// `ratings` and `num_of_reviews` are derived from `reviews` and must be
/// recomputed together with any review mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, immutable.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Non-negative price.
    pub price: f64,
    pub category: String,
    /// Units in stock.
    pub stock: u32,
    /// Ordered image references, each owned exclusively by this product.
    pub images: Vec<ImageRef>,
    /// Ordered review list.
    pub reviews: Vec<Review>,
    /// Mean review rating in `[0, 5]`; `0.0` when there are no reviews.
    pub ratings: f64,
    /// Always equal to `reviews.len()` after a completed mutation.
    pub num_of_reviews: u32,
    /// The creating user (not owned).
    pub owner: UserId,
    pub is_verified: bool,
    pub is_bulk: bool,
    /// Set once at creation, immutable.
    pub created_at: DateTime<Utc>,
}

/// Fields of a product before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub images: Vec<ImageRef>,
    pub owner: UserId,
    pub is_verified: bool,
    pub is_bulk: bool,
}

impl NewProduct {
    /// Materialize a full product record under the given id.
    ///
    /// Sets `created_at` to now and starts with no reviews and zero
    /// aggregates.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            images: self.images,
            reviews: Vec::new(),
            ratings: 0.0,
            num_of_reviews: 0,
            owner: self.owner,
            is_verified: self.is_verified,
            is_bulk: self.is_bulk,
            created_at: Utc::now(),
        }
    }
}
