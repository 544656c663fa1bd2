use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::product::ImageRef;
use crate::types::{ListingId, UserId};

/// A user-submitted "sell" listing.
///
/// Shares the product's image ownership rules but carries no reviews;
/// its `ratings` field stays at zero until a listing is promoted into
/// the main catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellListing {
    /// Store-assigned identifier, immutable.
    pub id: ListingId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub images: Vec<ImageRef>,
    pub ratings: f64,
    /// The submitting user (not owned).
    pub owner: UserId,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields of a sell listing before the store has assigned an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub images: Vec<ImageRef>,
    pub owner: UserId,
    pub is_verified: bool,
}

impl NewListing {
    /// Materialize a full listing record under the given id.
    #[must_use]
    pub fn into_listing(self, id: ListingId) -> SellListing {
        SellListing {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            images: self.images,
            ratings: 0.0,
            owner: self.owner,
            is_verified: self.is_verified,
            created_at: Utc::now(),
        }
    }
}
