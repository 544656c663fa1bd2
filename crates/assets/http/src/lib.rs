pub mod client;
pub mod config;

pub use client::HttpAssetStore;
pub use config::HttpAssetConfig;
