//! HTTP clients for the third-party providers backing each lookup.

pub mod events;
pub mod geocode;
pub mod weather;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{provider} returned no results")]
    NoData { provider: &'static str },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error: {status} - {body}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },
}

impl UpstreamError {
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::NoData { provider }
            | Self::Transport { provider, .. }
            | Self::Status { provider, .. } => provider,
        }
    }
}

/// Issues a GET against `url` and decodes the JSON body.
///
/// The URL carries the provider's API key, so it is never logged.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &'static str,
    url: &str,
) -> Result<T, UpstreamError> {
    debug!(provider, "Calling upstream API");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status {
            provider,
            status,
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|source| UpstreamError::Transport { provider, source })
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}
