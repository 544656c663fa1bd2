use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use bazaar_assets::error::AssetError;
use bazaar_assets::store::AssetStore;
use bazaar_assets::types::StoredAsset;
use bazaar_core::AssetId;

/// In-memory [`AssetStore`] that records every call for assertions.
///
/// Besides acting as a functional backend, it supports fault injection:
/// individual upload calls (by sequence number) and destroy calls (by
/// asset id) can be made to fail, which is how the partial-failure
/// behavior of the lifecycle services is tested.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    upload_calls: AtomicU64,
    live: DashMap<AssetId, StoredAsset>,
    uploads: Mutex<Vec<StoredAsset>>,
    destroys: Mutex<Vec<AssetId>>,
    failing_upload_calls: Mutex<HashSet<u64>>,
    failing_destroy_ids: Mutex<HashSet<AssetId>>,
}

impl MemoryAssetStore {
    /// Create a new, empty in-memory asset store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `nth` upload call (1-based) fail with an upload error.
    pub fn fail_upload_call(&self, nth: u64) {
        self.failing_upload_calls
            .lock()
            .expect("lock poisoned")
            .insert(nth);
    }

    /// Make every destroy call for `id` fail with a destroy error.
    pub fn fail_destroy_of(&self, id: impl Into<AssetId>) {
        self.failing_destroy_ids
            .lock()
            .expect("lock poisoned")
            .insert(id.into());
    }

    /// All assets ever uploaded, in call order.
    #[must_use]
    pub fn uploaded(&self) -> Vec<StoredAsset> {
        self.uploads.lock().expect("lock poisoned").clone()
    }

    /// All successfully destroyed asset ids, in call order.
    #[must_use]
    pub fn destroyed(&self) -> Vec<AssetId> {
        self.destroys.lock().expect("lock poisoned").clone()
    }

    /// Whether an asset is currently live in the store.
    #[must_use]
    pub fn contains(&self, id: &AssetId) -> bool {
        self.live.contains_key(id)
    }

    /// Number of currently live assets.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn upload(&self, data: &str, namespace: &str) -> Result<StoredAsset, AssetError> {
        let call = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self
            .failing_upload_calls
            .lock()
            .expect("lock poisoned")
            .contains(&call)
        {
            return Err(AssetError::Upload(format!(
                "injected failure on upload call {call}"
            )));
        }
        if data.is_empty() {
            return Err(AssetError::Upload("empty image payload".to_owned()));
        }

        let asset = StoredAsset {
            asset_id: AssetId::new(format!("{namespace}/asset-{call}")),
            url: format!("https://assets.invalid/{namespace}/asset-{call}"),
        };
        self.live.insert(asset.asset_id.clone(), asset.clone());
        self.uploads
            .lock()
            .expect("lock poisoned")
            .push(asset.clone());
        Ok(asset)
    }

    async fn destroy(&self, id: &AssetId) -> Result<bool, AssetError> {
        if self
            .failing_destroy_ids
            .lock()
            .expect("lock poisoned")
            .contains(id)
        {
            return Err(AssetError::Destroy(format!(
                "injected failure destroying {id}"
            )));
        }

        let existed = self.live.remove(id).is_some();
        if existed {
            self.destroys.lock().expect("lock poisoned").push(id.clone());
        }
        Ok(existed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_assigns_sequential_namespaced_ids() {
        let store = MemoryAssetStore::new();
        let a = store.upload("data-a", "products").await.unwrap();
        let b = store.upload("data-b", "products").await.unwrap();

        assert_ne!(a.asset_id, b.asset_id);
        assert!(a.asset_id.as_str().starts_with("products/"));
        assert_eq!(store.live_count(), 2);
    }

    #[tokio::test]
    async fn destroy_is_idempotent() {
        let store = MemoryAssetStore::new();
        let asset = store.upload("data", "products").await.unwrap();

        assert!(store.destroy(&asset.asset_id).await.unwrap());
        assert!(!store.destroy(&asset.asset_id).await.unwrap());
        assert_eq!(store.destroyed(), vec![asset.asset_id]);
    }

    #[tokio::test]
    async fn injected_upload_failure_hits_exact_call() {
        let store = MemoryAssetStore::new();
        store.fail_upload_call(2);

        store.upload("one", "products").await.unwrap();
        let err = store.upload("two", "products").await.unwrap_err();
        assert!(matches!(err, AssetError::Upload(_)));
        store.upload("three", "products").await.unwrap();
        assert_eq!(store.live_count(), 2);
    }

    #[tokio::test]
    async fn injected_destroy_failure_leaves_asset_live() {
        let store = MemoryAssetStore::new();
        let asset = store.upload("data", "products").await.unwrap();
        store.fail_destroy_of(asset.asset_id.clone());

        let err = store.destroy(&asset.asset_id).await.unwrap_err();
        assert!(matches!(err, AssetError::Destroy(_)));
        assert!(store.contains(&asset.asset_id));
    }
}
