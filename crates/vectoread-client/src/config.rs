//! Service endpoint configuration.
//!
//! The base URL can be overridden through `VECTOREAD_API_BASE_URL`;
//! everything else about the service surface is fixed.

const BASE_URL_ENV: &str = "VECTOREAD_API_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Location of the VectoRead API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    base_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ServiceConfig {
    /// Create a configuration for the given base URL. Trailing slashes are
    /// normalized away so endpoint joins stay well-formed.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Read the base URL from the environment, falling back to the local
    /// development default.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Document ingestion endpoint.
    pub fn ingest_url(&self) -> String {
        format!("{}/ingest", self.base_url)
    }

    /// Streaming query endpoint.
    pub fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}
