//! Central error type for the API service
//!
//! Maps the domain taxonomy onto HTTP statuses. Authentication failures stay
//! deliberately generic so responses cannot be used to enumerate accounts;
//! storage failures are logged with detail but surfaced without it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown email or wrong password; never says which
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or invalid bearer token
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Valid identity, action denied by the policy table
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
                "INVALID_CREDENTIALS",
            ),
            ApiError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHENTICATED"),
            ApiError::Unauthorized => {
                (StatusCode::FORBIDDEN, "Unauthorized".to_string(), "UNAUTHORIZED")
            }
            ApiError::RateLimitExceeded(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, msg, "RATE_LIMIT_EXCEEDED")
            }
            ApiError::Domain(err) => match &err {
                DomainError::InvalidInput { .. } => {
                    (StatusCode::BAD_REQUEST, err.to_string(), "INVALID_INPUT")
                }
                DomainError::Conflict { .. } | DomainError::Referenced { .. } => {
                    (StatusCode::CONFLICT, err.to_string(), "CONFLICT")
                }
                DomainError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, err.to_string(), "NOT_FOUND")
                }
                DomainError::Storage(detail) => {
                    tracing::error!(%detail, "storage failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Storage failure".to_string(),
                        "STORAGE_FAILURE",
                    )
                }
            },
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_expected_statuses() {
        let cases = [
            (
                ApiError::from(DomainError::invalid("cvssScore", "out of range")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(DomainError::conflict("application", "APP-001")),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(DomainError::not_found("finding", "x")),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (ApiError::Unauthorized, StatusCode::FORBIDDEN),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
