use serde::{Deserialize, Serialize};

use bazaar_core::AssetId;

/// Metadata returned by the asset store for a stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    /// Store-assigned stable identifier.
    pub asset_id: AssetId,
    /// Retrievable URL for the asset.
    pub url: String,
}
