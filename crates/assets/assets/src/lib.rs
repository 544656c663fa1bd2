pub mod error;
pub mod store;
pub mod types;

pub use error::AssetError;
pub use store::AssetStore;
pub use types::StoredAsset;
