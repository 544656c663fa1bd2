pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use tracing::info;

use bazaar_assets::store::AssetStore;
use bazaar_assets_http::{HttpAssetConfig, HttpAssetStore};
use bazaar_assets_memory::MemoryAssetStore;
use bazaar_catalog::{ListingService, ProductService, ReviewService};
use bazaar_store_memory::{MemoryListingStore, MemoryProductStore};

use crate::api::AppState;
use crate::config::{AssetBackend, BazaarConfig};
use crate::error::ServerError;

/// Build the application state from configuration.
pub fn build_state(config: &BazaarConfig) -> Result<AppState, ServerError> {
    let assets: Arc<dyn AssetStore> = match config.assets.backend {
        AssetBackend::Memory => Arc::new(MemoryAssetStore::new()),
        AssetBackend::Http => {
            let base_url = config.assets.base_url.clone().ok_or_else(|| {
                ServerError::Config("assets.base_url is required for the http backend".to_owned())
            })?;
            let mut asset_config = HttpAssetConfig::new(base_url);
            asset_config.api_key = config.assets.api_key.clone();
            asset_config.timeout = config.assets.timeout();
            Arc::new(HttpAssetStore::new(asset_config))
        }
    };

    let products_store = Arc::new(MemoryProductStore::new());
    let listings_store = Arc::new(MemoryListingStore::new());

    Ok(AppState {
        products: Arc::new(ProductService::new(products_store.clone(), assets.clone())),
        reviews: Arc::new(ReviewService::new(products_store)),
        listings: Arc::new(ListingService::new(listings_store, assets)),
    })
}

/// Bind the listener and serve the API until shutdown.
pub async fn serve(config: BazaarConfig) -> Result<(), ServerError> {
    let state = build_state(&config)?;
    let app = api::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "bazaar server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
