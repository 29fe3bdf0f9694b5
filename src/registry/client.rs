//! HTTP client shared foundation
//!
//! A thin reqwest wrapper with configurable timeout and User-Agent that
//! maps transport failures onto [`RegistryError`]. Retrying is out of
//! scope at this layer; each call is a single attempt.

use crate::config::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_USER_AGENT};
use crate::error::RegistryError;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(
            Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS),
            DEFAULT_USER_AGENT,
        )
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                RegistryError::network_error("", format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Perform a GET request and parse the JSON response
    ///
    /// Classification: 404 is `PackageNotFound`, other non-success statuses
    /// and connection failures are `NetworkError`, an elapsed deadline is
    /// `Timeout`, and an undecodable body is `InvalidResponse`.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
    ) -> Result<T, RegistryError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_transport(package, &e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::package_not_found(package));
        }
        if !status.is_success() {
            return Err(RegistryError::network_error(
                package,
                format!("HTTP {}", status),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                RegistryError::invalid_response(package, format!("failed to parse JSON: {}", e))
            } else {
                Self::classify_transport(package, &e)
            }
        })
    }

    fn classify_transport(package: &str, err: &reqwest::Error) -> RegistryError {
        if err.is_timeout() {
            RegistryError::timeout(package)
        } else {
            RegistryError::network_error(package, err.to_string())
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("failed to create default HTTP client")
    }
}
