//! Shared image upload/destroy plumbing for products and listings.

use tracing::warn;

use bazaar_assets::store::AssetStore;
use bazaar_core::ImageRef;

use crate::error::CatalogError;

/// Logical namespace under which all product and listing images live.
pub const ASSET_NAMESPACE: &str = "products";

/// Upload every image payload in order, collecting the resulting refs.
///
/// On a mid-sequence failure, the already-uploaded assets are destroyed
/// best-effort before the upload error is returned, so a failed create
/// does not leave orphans behind. A rollback destroy that itself fails
/// is logged and swallowed; at that point the asset is unreachable from
/// any record and only the store's own garbage collection can reclaim it.
pub(crate) async fn upload_all(
    assets: &dyn AssetStore,
    payloads: Vec<String>,
) -> Result<Vec<ImageRef>, CatalogError> {
    let mut uploaded = Vec::with_capacity(payloads.len());
    for (index, payload) in payloads.iter().enumerate() {
        match assets.upload(payload, ASSET_NAMESPACE).await {
            Ok(asset) => uploaded.push(ImageRef {
                asset_id: asset.asset_id,
                url: asset.url,
            }),
            Err(err) => {
                warn!(index, error = %err, "image upload failed, rolling back earlier uploads");
                rollback(assets, &uploaded).await;
                return Err(err.into());
            }
        }
    }
    Ok(uploaded)
}

async fn rollback(assets: &dyn AssetStore, uploaded: &[ImageRef]) {
    for image in uploaded {
        if let Err(err) = assets.destroy(&image.asset_id).await {
            warn!(asset_id = %image.asset_id, error = %err, "rollback destroy failed, asset orphaned");
        }
    }
}

/// Destroy every linked asset, aborting on the first hard failure.
///
/// Used by image replacement during update, where continuing past a
/// failed destroy would link new images while old assets still exist.
/// An already-absent asset is a successful no-op.
pub(crate) async fn destroy_all(
    assets: &dyn AssetStore,
    images: &[ImageRef],
) -> Result<(), CatalogError> {
    for image in images {
        assets.destroy(&image.asset_id).await?;
    }
    Ok(())
}
