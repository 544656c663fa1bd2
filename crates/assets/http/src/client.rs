use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use bazaar_assets::error::AssetError;
use bazaar_assets::store::AssetStore;
use bazaar_assets::types::StoredAsset;
use bazaar_core::AssetId;

use crate::config::HttpAssetConfig;

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
    folder: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

/// [`AssetStore`] backed by a remote image-hosting HTTP API.
///
/// Uploads `POST {base}/upload` with the raw image payload (a data URI or
/// URL) and the target folder; destroys `DELETE {base}/assets/{id}`. A
/// 404 on destroy is treated as the asset already being gone, matching
/// the idempotent destroy contract.
pub struct HttpAssetStore {
    config: HttpAssetConfig,
    client: Client,
}

impl HttpAssetStore {
    /// Create a new client with the configured timeout.
    #[must_use]
    pub fn new(config: HttpAssetConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    /// Create a client sharing an existing connection pool.
    #[must_use]
    pub fn with_client(config: HttpAssetConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    #[instrument(skip(self, data))]
    async fn upload(&self, data: &str, namespace: &str) -> Result<StoredAsset, AssetError> {
        let url = format!("{}/upload", self.config.base_url);
        let request = self.client.post(&url).json(&UploadRequest {
            file: data,
            folder: namespace,
        });

        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| AssetError::Upload(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "asset upload rejected");
            return Err(AssetError::Upload(format!(
                "upload rejected with status {status}: {body}"
            )));
        }

        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| AssetError::Upload(format!("malformed upload response: {e}")))?;
        debug!(asset_id = %parsed.public_id, "asset uploaded");

        Ok(StoredAsset {
            asset_id: AssetId::new(parsed.public_id),
            url: parsed.secure_url,
        })
    }

    #[instrument(skip(self))]
    async fn destroy(&self, id: &AssetId) -> Result<bool, AssetError> {
        let url = format!("{}/assets/{id}", self.config.base_url);
        let response = self
            .apply_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| AssetError::Destroy(format!("request to {url} failed: {e}")))?;

        match response.status() {
            // Already gone: destroy is idempotent.
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => {
                debug!(asset_id = %id, "asset destroyed");
                Ok(true)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AssetError::Destroy(format!(
                    "destroy of {id} rejected with status {status}: {body}"
                )))
            }
        }
    }
}
