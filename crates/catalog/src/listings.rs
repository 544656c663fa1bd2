use std::sync::Arc;

use tracing::{info, instrument};

use bazaar_assets::store::AssetStore;
use bazaar_core::{Caller, CreateListing, ImagesInput, NewListing, SellListing, flag_is_true};
use bazaar_store::store::ListingStore;

use crate::error::CatalogError;
use crate::images;

/// Handles user-submitted sell listings.
///
/// Shares the product service's image pipeline: the same shape
/// resolution, ordered uploads under the `"products"` namespace, and
/// rollback of partial uploads on failure.
pub struct ListingService {
    store: Arc<dyn ListingStore>,
    assets: Arc<dyn AssetStore>,
}

impl ListingService {
    /// Create a listing service over the given backends.
    pub fn new(store: Arc<dyn ListingStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { store, assets }
    }

    /// Create a sell listing owned by the caller.
    #[instrument(skip(self, payload), fields(caller = %caller.id))]
    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateListing,
    ) -> Result<SellListing, CatalogError> {
        let images_input = ImagesInput::from_value(&payload.images)?;
        if payload.price < 0.0 {
            return Err(CatalogError::Validation(
                "price must be non-negative".to_owned(),
            ));
        }

        let images = images::upload_all(self.assets.as_ref(), images_input.into_vec()).await?;

        let listing = self
            .store
            .insert(NewListing {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                category: payload.category,
                stock: payload.stock.unwrap_or(1),
                images,
                owner: caller.id.clone(),
                is_verified: flag_is_true(payload.is_verified.as_deref()),
            })
            .await?;

        info!(listing = %listing.id, images = listing.images.len(), "sell listing created");
        Ok(listing)
    }

    /// All listings.
    pub async fn list(&self) -> Result<Vec<SellListing>, CatalogError> {
        Ok(self.store.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use bazaar_assets_memory::MemoryAssetStore;
    use bazaar_core::UserId;
    use bazaar_store_memory::MemoryListingStore;

    use super::*;

    fn service() -> (Arc<MemoryAssetStore>, ListingService) {
        let assets = Arc::new(MemoryAssetStore::new());
        let service = ListingService::new(Arc::new(MemoryListingStore::new()), assets.clone());
        (assets, service)
    }

    fn payload(images: serde_json::Value) -> CreateListing {
        serde_json::from_value(json!({
            "name": "Used bike",
            "description": "Three gears, some rust",
            "price": 80.0,
            "category": "sports",
            "images": images
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_links_images_in_order() {
        let (assets, service) = service();
        let listing = service
            .create(&Caller::new("u-1", "Ada"), payload(json!(["a", "b"])))
            .await
            .unwrap();

        assert_eq!(listing.images.len(), 2);
        assert_eq!(
            listing.images.iter().map(|i| &i.asset_id).collect::<Vec<_>>(),
            assets.uploaded().iter().map(|a| &a.asset_id).collect::<Vec<_>>()
        );
        assert_eq!(listing.owner, UserId::new("u-1"));
        assert_eq!(listing.ratings, 0.0);
        assert!(!listing.is_verified);
    }

    #[tokio::test]
    async fn invalid_images_shape_is_rejected() {
        let (assets, service) = service();
        let err = service
            .create(&Caller::new("u-1", "Ada"), payload(json!({ "not": "valid" })))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(assets.uploaded().is_empty());
    }

    #[tokio::test]
    async fn partial_upload_failure_rolls_back() {
        let (assets, service) = service();
        assets.fail_upload_call(2);

        let err = service
            .create(&Caller::new("u-1", "Ada"), payload(json!(["a", "b"])))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Asset(_)));
        assert_eq!(assets.live_count(), 0);
        assert!(service.list().await.unwrap().is_empty());
    }
}
