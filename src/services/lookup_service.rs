//! Domain service for the cache-aside lookups behind each endpoint.

use crate::clients::UpstreamError;
use crate::models::{Event, Location, LocationRef, Weather};
use thiserror::Error;

/// Domain errors for lookup operations.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{provider} returned no data")]
    NoData { provider: &'static str },

    #[error(transparent)]
    Upstream(UpstreamError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<UpstreamError> for LookupError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NoData { provider } => Self::NoData { provider },
            other => Self::Upstream(other),
        }
    }
}

impl From<sea_orm::DbErr> for LookupError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

// Store methods surface `anyhow` errors, all of which originate in the database layer.
impl From<anyhow::Error> for LookupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Cache-aside lookup service.
///
/// Each operation checks the cache store first and only calls the upstream
/// provider on a miss, persisting what it fetched before returning it.
#[async_trait::async_trait]
pub trait LookupService: Send + Sync {
    /// Resolves a free-text address to a stored location.
    ///
    /// # Errors
    ///
    /// - [`LookupError::NoData`] if the geocoder finds nothing
    /// - [`LookupError::Upstream`] on transport or provider failures
    /// - [`LookupError::Database`] if the cache cannot be read or written
    async fn location(&self, search_query: &str) -> Result<Location, LookupError>;

    /// Daily forecasts for a stored location.
    async fn weather(&self, location: LocationRef) -> Result<Vec<Weather>, LookupError>;

    /// Events near a stored location.
    async fn events(&self, location: LocationRef) -> Result<Vec<Event>, LookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_is_lifted_out_of_upstream_errors() {
        let err = LookupError::from(UpstreamError::NoData {
            provider: "Dark Sky",
        });
        assert!(matches!(err, LookupError::NoData { provider: "Dark Sky" }));
    }

    #[test]
    fn test_status_errors_stay_upstream() {
        let err = LookupError::from(UpstreamError::Status {
            provider: "Eventbrite",
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "invalid token".to_string(),
        });
        assert!(matches!(err, LookupError::Upstream(_)));
        assert_eq!(
            err.to_string(),
            "Eventbrite API error: 401 Unauthorized - invalid token"
        );
    }
}
