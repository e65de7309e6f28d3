//! Error types for the gateway
//!
//! This module defines the error taxonomy used throughout the service and the
//! mapping from errors to structured HTTP responses.

use crate::auth::jwt::TokenError;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, PlazaError>;

/// Main error type for the gateway
#[derive(Error, Debug)]
pub enum PlazaError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Failed login. Unknown username and wrong password produce this same
    /// variant so callers cannot enumerate accounts.
    #[error("Invalid username or password")]
    BadCredentials,

    /// Token validation errors
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// No identity where one is required
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Identity present but role insufficient
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource belongs to a different tenant than the caller
    #[error("Tenant mismatch: {0}")]
    TenantMismatch(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// External service errors
    #[error("External service error: {0}")]
    External(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for PlazaError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            PlazaError::BadCredentials => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "BAD_CREDENTIALS",
                self.to_string(),
            ),
            PlazaError::Token(TokenError::Expired) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                self.to_string(),
            ),
            PlazaError::Token(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                self.to_string(),
            ),
            PlazaError::Unauthorized(_) => (
                actix_web::http::StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                self.to_string(),
            ),
            PlazaError::Forbidden(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "FORBIDDEN",
                self.to_string(),
            ),
            PlazaError::TenantMismatch(_) => (
                actix_web::http::StatusCode::FORBIDDEN,
                "TENANT_MISMATCH",
                self.to_string(),
            ),
            PlazaError::Validation(_) => (
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            PlazaError::NotFound(_) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                self.to_string(),
            ),
            PlazaError::Conflict(_) => (
                actix_web::http::StatusCode::CONFLICT,
                "CONFLICT",
                self.to_string(),
            ),
            PlazaError::External(_) => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "EXTERNAL_ERROR",
                self.to_string(),
            ),
            PlazaError::Config(_) => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            _ => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}

/// Helper functions for creating specific errors
impl PlazaError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn tenant_mismatch<S: Into<String>>(message: S) -> Self {
        Self::TenantMismatch(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn external<S: Into<String>>(message: S) -> Self {
        Self::External(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = PlazaError::unauthorized("missing token");
        assert!(matches!(error, PlazaError::Unauthorized(_)));

        let error = PlazaError::conflict("username taken");
        assert!(matches!(error, PlazaError::Conflict(_)));
    }

    #[test]
    fn test_bad_credentials_message_is_fixed() {
        // Unknown-user and wrong-password failures must be byte-identical.
        assert_eq!(
            PlazaError::BadCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_status_codes() {
        use actix_web::http::StatusCode;

        assert_eq!(
            PlazaError::BadCredentials.error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PlazaError::Token(TokenError::Expired).error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PlazaError::forbidden("role missing").error_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            PlazaError::not_found("no such store").error_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PlazaError::conflict("duplicate").error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PlazaError::external("proxy down").error_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
