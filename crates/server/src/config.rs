use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ServerError;

/// Top-level configuration for the Bazaar server, loaded from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct BazaarConfig {
    /// HTTP server bind configuration.
    #[serde(default)]
    pub server: ListenConfig,
    /// Asset store backend configuration.
    #[serde(default)]
    pub assets: AssetsConfig,
}

impl BazaarConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> Result<Self, ServerError> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| ServerError::Config(e.to_string()))
    }
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 4000,
        }
    }
}

/// Which asset store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetBackend {
    /// In-process store; assets do not survive a restart.
    Memory,
    /// Remote image-hosting HTTP API.
    Http,
}

/// Asset store configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub backend: AssetBackend,
    /// Base URL of the hosting API (required for the `http` backend).
    pub base_url: Option<String>,
    /// Bearer token for the hosting API.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl AssetsConfig {
    /// The configured per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            backend: AssetBackend::Memory,
            base_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: BazaarConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.assets.backend, AssetBackend::Memory);
        assert_eq!(config.assets.timeout_secs, 30);
    }

    #[test]
    fn http_backend_parses() {
        let config: BazaarConfig = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [assets]
            backend = "http"
            base_url = "https://img.example.com/v1"
            api_key = "secret"
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.assets.backend, AssetBackend::Http);
        assert_eq!(
            config.assets.base_url.as_deref(),
            Some("https://img.example.com/v1")
        );
        assert_eq!(config.assets.timeout(), Duration::from_secs(10));
    }
}
