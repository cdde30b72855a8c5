//! Client configuration

use std::path::PathBuf;

/// Environment variable overriding the order service base URL
pub const BASE_URL_ENV: &str = "ORDER_API_BASE_URL";

/// Default order service base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Client configuration for connecting to the order service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL; resource paths (`/orders`, `/export/...`) are appended
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory the default download sink writes exports into
    pub download_dir: PathBuf,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 10,
            download_dir: PathBuf::from("downloads"),
        }
    }

    /// Load from the process environment
    ///
    /// Only the base URL is configurable this way.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using a custom variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the export download directory
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
