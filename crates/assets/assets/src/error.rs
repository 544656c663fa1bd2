use thiserror::Error;

/// Errors that can occur during asset store operations.
#[derive(Debug, Error)]
pub enum AssetError {
    /// An upload was rejected or failed in transit.
    #[error("asset upload failed: {0}")]
    Upload(String),

    /// A destroy call failed for a reason other than the asset being
    /// absent (absence is reported as a successful no-op, not an error).
    #[error("asset destroy failed: {0}")]
    Destroy(String),
}
