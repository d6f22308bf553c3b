//! Grimoire — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use grimoire_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid, or the
    /// configured table cannot be seated.
    #[error("configuration error: {0}")]
    Config(String),

    /// Loading the script or running the session failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error that implements `IntoResponse`.
#[derive(Debug)]
pub enum ApiError {
    /// A domain failure.
    Domain(DomainError),
    /// Nothing to return, e.g. no question is waiting.
    NotFound(&'static str, String),
    /// The request conflicts with the session's current state.
    Conflict(&'static str, String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            Self::NotFound(code, message) => (StatusCode::NOT_FOUND, code, message),
            Self::Conflict(code, message) => (StatusCode::CONFLICT, code, message),
            Self::Domain(err) => {
                let (status, code) = match &err {
                    DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                    DomainError::MalformedScript(_) => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "malformed_script")
                    }
                    DomainError::Oracle(_) => (StatusCode::BAD_GATEWAY, "oracle_error"),
                    DomainError::Transport(_) => {
                        (StatusCode::SERVICE_UNAVAILABLE, "transport_error")
                    }
                    DomainError::Storyteller(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "storyteller_error")
                    }
                    DomainError::Infrastructure(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                    }
                };
                (status, code, err.to_string())
            }
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_oracle_maps_to_502() {
        assert_eq!(
            status_of(DomainError::Oracle("model down".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_transport_maps_to_503() {
        assert_eq!(
            status_of(DomainError::Transport("gone".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_and_not_found() {
        assert_eq!(
            status_of(ApiError::Conflict("no_pending_prompt", "nothing".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::NotFound("no_pending_prompt", "nothing".into())),
            StatusCode::NOT_FOUND
        );
    }
}
