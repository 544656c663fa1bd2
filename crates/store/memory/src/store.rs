use async_trait::async_trait;
use dashmap::DashMap;

use bazaar_core::{ListingId, NewListing, NewProduct, Product, ProductId, SellListing};
use bazaar_store::error::StoreError;
use bazaar_store::store::{CasOutcome, ListingStore, ProductStore, Versioned};

/// A single entry in the in-memory product store.
#[derive(Debug, Clone)]
struct Entry {
    product: Product,
    version: u64,
}

/// In-memory [`ProductStore`] backed by a [`DashMap`].
///
/// Versions start at 1 on insert and advance by 1 on every successful
/// compare-and-swap. The entry API keeps the version check and the write
/// under one shard lock, so concurrent writers cannot interleave between
/// check and swap.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    data: DashMap<ProductId, Entry>,
}

impl MemoryProductStore {
    /// Create a new, empty in-memory product store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, new: NewProduct) -> Result<Versioned<Product>, StoreError> {
        let product = new.into_product(ProductId::generate());
        let versioned = Versioned {
            record: product.clone(),
            version: 1,
        };
        self.data.insert(
            product.id.clone(),
            Entry {
                product,
                version: 1,
            },
        );
        Ok(versioned)
    }

    async fn find(&self, id: &ProductId) -> Result<Option<Versioned<Product>>, StoreError> {
        Ok(self.data.get(id).map(|entry| Versioned {
            record: entry.product.clone(),
            version: entry.version,
        }))
    }

    async fn update(
        &self,
        id: &ProductId,
        product: Product,
        expected_version: u64,
    ) -> Result<CasOutcome, StoreError> {
        match self.data.get_mut(id) {
            Some(mut entry) if entry.version == expected_version => {
                entry.product = product;
                entry.version += 1;
                Ok(CasOutcome::Ok {
                    new_version: entry.version,
                })
            }
            Some(entry) => Ok(CasOutcome::Conflict {
                current_version: entry.version,
            }),
            None => Err(StoreError::Backend(format!(
                "update on missing product {id}"
            ))),
        }
    }

    async fn remove(&self, id: &ProductId) -> Result<bool, StoreError> {
        Ok(self.data.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .data
            .iter()
            .map(|entry| entry.product.clone())
            .collect())
    }
}

/// In-memory [`ListingStore`] backed by a [`DashMap`].
#[derive(Debug, Default)]
pub struct MemoryListingStore {
    data: DashMap<ListingId, SellListing>,
}

impl MemoryListingStore {
    /// Create a new, empty in-memory listing store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn insert(&self, new: NewListing) -> Result<SellListing, StoreError> {
        let listing = new.into_listing(ListingId::generate());
        self.data.insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    async fn list(&self) -> Result<Vec<SellListing>, StoreError> {
        Ok(self.data.iter().map(|entry| entry.value().clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use bazaar_core::UserId;
    use bazaar_store::testing::run_product_store_conformance_tests;

    use super::*;

    #[tokio::test]
    async fn conformance() {
        let store = MemoryProductStore::new();
        run_product_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test]
    async fn update_on_missing_product_is_a_backend_error() {
        let store = MemoryProductStore::new();
        let inserted = store
            .insert(NewProduct {
                name: "Lamp".into(),
                description: "A desk lamp".into(),
                price: 25.0,
                category: "home".into(),
                stock: 1,
                images: vec![],
                owner: UserId::new("u-1"),
                is_verified: false,
                is_bulk: false,
            })
            .await
            .unwrap();
        store.remove(&inserted.record.id).await.unwrap();

        let err = store
            .update(&inserted.record.id, inserted.record.clone(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn listings_round_trip() {
        let store = MemoryListingStore::new();
        let listing = store
            .insert(NewListing {
                name: "Used bike".into(),
                description: "Three gears".into(),
                price: 80.0,
                category: "sports".into(),
                stock: 1,
                images: vec![],
                owner: UserId::new("u-2"),
                is_verified: false,
            })
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, listing.id);
    }
}
