//! Wire types and HTTP plumbing for the blog REST API.

pub mod api;
pub mod types;

use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Build an HTTP client with the configured timeouts.
pub(crate) fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, ApiError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.request_secs))
        .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
        .build()
        .map_err(|error| ApiError::HttpClientBuild(error.to_string()))
}
