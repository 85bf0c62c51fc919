//! Client configuration.

use std::time::Duration;

/// Public NASA Earth imagery endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.nasa.gov/planetary/earth/imagery";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_VAR: &str = "NASA_IMAGERY_URL";

/// Width and height of the requested footprint, in degrees.
pub const IMAGE_DIM: f64 = 0.1;

/// Environment variables searched for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["NASA_API_KEY", "NEXT_PUBLIC_NASA_API_KEY"];

pub const USER_AGENT: &str = concat!("earth-viewer/", env!("CARGO_PKG_VERSION"));

/// Configuration for the imagery client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Imagery endpoint URL
    pub endpoint: String,
    /// Footprint size sent as `dim`
    pub dim: f64,
    /// Whole-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            dim: IMAGE_DIM,
            request_timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the endpoint taken from `NASA_IMAGERY_URL` when set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var(ENDPOINT_VAR) {
            Ok(endpoint) if !endpoint.trim().is_empty() => config.with_endpoint(endpoint.trim()),
            _ => config,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.dim, 0.1);
        assert!(config.request_timeout.is_none());
        assert!(config.user_agent.starts_with("earth-viewer/"));
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_endpoint("http://localhost:9000/imagery")
            .with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(config.endpoint, "http://localhost:9000/imagery");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }
}
