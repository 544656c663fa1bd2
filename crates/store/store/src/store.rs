use async_trait::async_trait;

use bazaar_core::{NewListing, NewProduct, Product, ProductId, SellListing};

use crate::error::StoreError;

/// A stored record together with its optimistic-concurrency version.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub record: T,
    pub version: u64,
}

/// Result of a compare-and-swap update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasOutcome {
    /// The swap succeeded; the record now carries this version.
    Ok { new_version: u64 },
    /// The swap failed because the stored version didn't match.
    Conflict { current_version: u64 },
}

/// Trait for persisting products.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// `update` is a compare-and-swap replace: it is the only write path for
/// review mutations, so that derived aggregates are never persisted from
/// a stale read.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product, assigning its identifier. Returns the full
    /// record at version 1.
    async fn insert(&self, new: NewProduct) -> Result<Versioned<Product>, StoreError>;

    /// Fetch a product by id. Returns `None` if absent.
    async fn find(&self, id: &ProductId) -> Result<Option<Versioned<Product>>, StoreError>;

    /// Replace a product's record only if the stored version matches
    /// `expected_version`.
    async fn update(
        &self,
        id: &ProductId,
        product: Product,
        expected_version: u64,
    ) -> Result<CasOutcome, StoreError>;

    /// Delete a product record. Returns `true` if the record existed.
    async fn remove(&self, id: &ProductId) -> Result<bool, StoreError>;

    /// All products, in no guaranteed order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
}

/// Trait for persisting user-submitted sell listings.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Insert a new listing, assigning its identifier.
    async fn insert(&self, new: NewListing) -> Result<SellListing, StoreError>;

    /// All listings, in no guaranteed order.
    async fn list(&self) -> Result<Vec<SellListing>, StoreError>;
}
