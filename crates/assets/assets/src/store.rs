use async_trait::async_trait;

use bazaar_core::AssetId;

use crate::error::AssetError;
use crate::types::StoredAsset;

/// Pluggable store for externally hosted product images.
///
/// Implementors provide the actual hosting mechanism (a remote image
/// service, or an in-memory double for tests). Calls are independent,
/// blocking network operations; they are not transactional with any
/// database write, and the catalog services surface their failures
/// rather than retrying.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload one image payload (a data URI or URL) under a logical
    /// namespace. The store assigns a stable identifier and returns the
    /// retrievable URL.
    async fn upload(&self, data: &str, namespace: &str) -> Result<StoredAsset, AssetError>;

    /// Destroy an asset by id. Idempotent: destroying an id that no
    /// longer exists returns `Ok(false)` rather than an error.
    async fn destroy(&self, id: &AssetId) -> Result<bool, AssetError>;
}
