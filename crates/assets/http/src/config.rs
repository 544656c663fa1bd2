use std::time::Duration;

/// Configuration for the remote image-hosting client.
#[derive(Debug, Clone)]
pub struct HttpAssetConfig {
    /// Base URL of the hosting API, without a trailing slash.
    pub base_url: String,
    /// Optional bearer token sent on every request.
    pub api_key: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpAssetConfig {
    /// Configuration with the default 30 second timeout and no auth.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}
