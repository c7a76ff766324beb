//! Outbound requests to the geolocation, geocoding, POI and encyclopedia providers.
//!
//! Every request type normalizes its outcome into a plain value: hard failures
//! (POI query) become an [`AppError`], soft ones (geocoding, summaries) degrade
//! to `None` after being logged.

mod locate;
mod nominatim;
mod overpass;
mod wikipedia;

pub use locate::*;
pub use overpass::*;
pub use wikipedia::*;

use std::sync::Arc;

use reqwest::Client;

use crate::config::Config;
use crate::errors::AppError;

/// Shared HTTP client plus the provider endpoints it talks to.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    config: Arc<Config>,
}

impl Gateway {
    /// Build the HTTP client from configuration.
    pub fn new(config: Arc<Config>) -> Result<Self, AppError> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// HTTP client with the configured user agent and request timeout.
pub fn build_client(config: &Config) -> Result<Client, AppError> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.request_timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Join a configured base URL and a path without doubling slashes.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("https://example.org/", "/reverse"),
            "https://example.org/reverse"
        );
        assert_eq!(
            endpoint("http://127.0.0.1:8000", "get-saved-locations/"),
            "http://127.0.0.1:8000/get-saved-locations/"
        );
    }
}
