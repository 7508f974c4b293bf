use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::services::LookupError;

/// Body sent for every failed request; the cause is only logged.
pub const GENERIC_ERROR_MESSAGE: &str = "Sorry something went wrong";

#[derive(Debug)]
pub enum ApiError {
    NoData(String),

    DatabaseError(String),

    ExternalApiError { service: String, message: String },

    MissingParameter(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NoData(provider) => write!(f, "No data: {} returned no results", provider),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ExternalApiError { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
            ApiError::MissingParameter(name) => write!(f, "Missing parameter: {}", name),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::NoData(_) | ApiError::ExternalApiError { .. } => {
                tracing::warn!("{}", self);
            }
            ApiError::MissingParameter(_) => tracing::info!("{}", self),
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                tracing::error!("{}", self);
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_MESSAGE).into_response()
    }
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NoData { provider } => ApiError::NoData(provider.to_string()),
            LookupError::Upstream(e) => ApiError::ExternalApiError {
                service: e.provider().to_string(),
                message: e.to_string(),
            },
            LookupError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl ApiError {
    pub fn missing(name: impl Into<String>) -> Self {
        ApiError::MissingParameter(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_every_variant_is_a_generic_500() {
        let errors = vec![
            ApiError::NoData("Google Geocoding".to_string()),
            ApiError::DatabaseError("disk I/O error".to_string()),
            ApiError::ExternalApiError {
                service: "Dark Sky".to_string(),
                message: "timeout".to_string(),
            },
            ApiError::missing("data"),
            ApiError::from(anyhow::anyhow!("boom")),
        ];

        for err in errors {
            let (status, body) = render(err).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, GENERIC_ERROR_MESSAGE);
        }
    }

    #[test]
    fn test_from_lookup_error() {
        let err = ApiError::from(LookupError::NoData {
            provider: "Eventbrite",
        });
        assert_eq!(err.to_string(), "No data: Eventbrite returned no results");

        let err = ApiError::from(LookupError::Database("locked".to_string()));
        assert!(matches!(err, ApiError::DatabaseError(ref msg) if msg == "locked"));
    }
}
