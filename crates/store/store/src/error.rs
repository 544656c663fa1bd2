use thiserror::Error;

/// Errors from product and listing store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("version conflict: expected version {expected}, found {found}")]
    VersionConflict { expected: u64, found: u64 },

    #[error("backend error: {0}")]
    Backend(String),
}
