use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use bazaar_assets::store::AssetStore;
use bazaar_core::{
    Caller, CreateProduct, ImageRef, ImagesInput, NewProduct, Product, ProductId, UpdateProduct,
    flag_is_true,
};
use bazaar_store::store::{CasOutcome, ProductStore};

use crate::MAX_CAS_RETRIES;
use crate::error::CatalogError;
use crate::images;

/// Orchestrates the product lifecycle: record persistence plus the
/// image assets each record owns in the external store.
///
/// Asset calls and record writes are not transactional with each other;
/// partial failures are surfaced to the caller rather than hidden, and
/// the per-operation cleanup policies are documented on each method.
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    assets: Arc<dyn AssetStore>,
}

impl ProductService {
    /// Create a product service over the given backends.
    pub fn new(store: Arc<dyn ProductStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { store, assets }
    }

    /// Create a product owned by the caller.
    ///
    /// The `images` field must be a bare string or an array of strings;
    /// each image is uploaded in input order. If an upload fails partway,
    /// the earlier uploads of this call are destroyed best-effort before
    /// the error is returned.
    #[instrument(skip(self, payload), fields(caller = %caller.id))]
    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateProduct,
    ) -> Result<Product, CatalogError> {
        let images_input = ImagesInput::from_value(&payload.images)?;
        if payload.price < 0.0 {
            return Err(CatalogError::Validation(
                "price must be non-negative".to_owned(),
            ));
        }

        let images = images::upload_all(self.assets.as_ref(), images_input.into_vec()).await?;

        let inserted = self
            .store
            .insert(NewProduct {
                name: payload.name,
                description: payload.description,
                price: payload.price,
                category: payload.category,
                stock: payload.stock.unwrap_or(1),
                images,
                owner: caller.id.clone(),
                is_verified: flag_is_true(payload.is_verified.as_deref()),
                is_bulk: flag_is_true(payload.is_bulk.as_deref()),
            })
            .await?;

        info!(product = %inserted.record.id, images = inserted.record.images.len(), "product created");
        Ok(inserted.record)
    }

    /// Apply a partial update.
    ///
    /// When `images` is provided, every currently linked asset is
    /// destroyed before the new set is uploaded (destroy-before-upload
    /// bounds storage cost). A destroy failure aborts the whole update:
    /// the stored record is left unchanged and still references whatever
    /// assets survive, which the caller learns about through the error.
    #[instrument(skip(self, payload))]
    pub async fn update(
        &self,
        id: &ProductId,
        payload: UpdateProduct,
    ) -> Result<Product, CatalogError> {
        // Resolve the images shape before touching any asset.
        let images_input = match &payload.images {
            Some(value) => Some(ImagesInput::from_value(value)?),
            None => None,
        };
        if let Some(price) = payload.price
            && price < 0.0
        {
            return Err(CatalogError::Validation(
                "price must be non-negative".to_owned(),
            ));
        }

        let loaded = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        // Image replacement happens once, outside the CAS retry loop, so a
        // lost swap never re-uploads or re-destroys assets.
        let replacement = match images_input {
            Some(input) => {
                images::destroy_all(self.assets.as_ref(), &loaded.record.images).await?;
                Some(images::upload_all(self.assets.as_ref(), input.into_vec()).await?)
            }
            None => None,
        };

        let mut current = loaded;
        for attempt in 0..MAX_CAS_RETRIES {
            let mut record = current.record.clone();
            apply_patch(&mut record, &payload, replacement.clone());

            match self
                .store
                .update(id, record.clone(), current.version)
                .await?
            {
                CasOutcome::Ok { .. } => {
                    info!(product = %id, "product updated");
                    return Ok(record);
                }
                CasOutcome::Conflict { current_version } => {
                    debug!(product = %id, attempt, current_version, "update lost the swap, retrying");
                    current = self
                        .store
                        .find(id)
                        .await?
                        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
                }
            }
        }

        Err(CatalogError::Conflict {
            id: id.clone(),
            retries: MAX_CAS_RETRIES,
        })
    }

    /// Delete a product and release its assets.
    ///
    /// Cleanup is best-effort: every linked asset gets a destroy attempt,
    /// individual failures are logged and skipped, and the record is
    /// always removed at the end. Returns how many assets were destroyed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &ProductId) -> Result<u32, CatalogError> {
        let loaded = self
            .store
            .find(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        let mut destroyed = 0u32;
        for image in &loaded.record.images {
            match self.assets.destroy(&image.asset_id).await {
                Ok(true) => destroyed += 1,
                Ok(false) => debug!(asset_id = %image.asset_id, "asset already absent"),
                Err(err) => {
                    warn!(asset_id = %image.asset_id, error = %err, "asset destroy failed, continuing");
                }
            }
        }

        self.store.remove(id).await?;
        info!(product = %id, destroyed, "product deleted");
        Ok(destroyed)
    }

    /// Fetch a single product.
    pub async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        Ok(self
            .store
            .find(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?
            .record)
    }

    /// All products.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.store.list().await?)
    }
}

fn apply_patch(record: &mut Product, payload: &UpdateProduct, images: Option<Vec<ImageRef>>) {
    if let Some(name) = &payload.name {
        record.name = name.clone();
    }
    if let Some(description) = &payload.description {
        record.description = description.clone();
    }
    if let Some(price) = payload.price {
        record.price = price;
    }
    if let Some(category) = &payload.category {
        record.category = category.clone();
    }
    if let Some(stock) = payload.stock {
        record.stock = stock;
    }
    if let Some(flag) = &payload.is_verified {
        record.is_verified = flag_is_true(Some(flag));
    }
    if let Some(flag) = &payload.is_bulk {
        record.is_bulk = flag_is_true(Some(flag));
    }
    if let Some(images) = images {
        record.images = images;
    }
}
