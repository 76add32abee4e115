//! Error handling for the Inkwell API
//!
//! This module provides a unified error type using thiserror, with HTTP
//! status code mapping via Axum's IntoResponse trait and GraphQL error
//! extensions via async-graphql's ErrorExtensions trait.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message returned to clients in place of internal error details
const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending input field
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Authentication & Authorization ==========
    /// Request carries no verified identity
    #[error("not authenticated")]
    Unauthorized,

    /// Invalid token (expired, malformed, bad signature)
    #[error("invalid authentication token: {0}")]
    InvalidToken(String),

    /// Login rejected (unknown email or wrong password)
    #[error("{0}")]
    InvalidCredentials(&'static str),

    /// Acting user is not allowed to touch the resource
    #[error("not authorized: {0}")]
    Forbidden(String),

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Resource already exists (conflict); `id` is kept for logs only
    #[error("{resource_type} exists already")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// One or more input fields were rejected
    #[error("Invalid Input")]
    InvalidInput(Vec<FieldError>),

    // ========== Infrastructure Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),

    /// JWT encoding error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401 Unauthorized
            Self::Unauthorized | Self::InvalidToken(_) | Self::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }

            // 403 Forbidden
            Self::Forbidden(_) => StatusCode::FORBIDDEN,

            // 404 Not Found
            Self::NotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::Conflict { .. } => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) | Self::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHENTICATED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Jwt(_) => "JWT_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Create a conflict error for a specific resource
    pub fn conflict(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            resource_type,
            id: id.into(),
        }
    }

    /// Message safe to show to clients
    ///
    /// Server errors never leak their internal details.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Field errors carried by an invalid input error, if any
    pub fn field_errors(&self) -> Option<&[FieldError]> {
        match self {
            Self::InvalidInput(errors) => Some(errors),
            _ => None,
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if let Self::Conflict { resource_type, id } = self {
            tracing::debug!(resource_type, id = %id, "Conflicting resource");
        }
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let details = self
            .field_errors()
            .and_then(|errors| serde_json::to_value(errors).ok());
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.public_message(),
            details,
        };

        (status, Json(error_response)).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let status = self.status_code().as_u16();
        let code = self.error_code();
        let fields = self
            .field_errors()
            .and_then(|errors| serde_json::to_value(errors).ok())
            .and_then(|json| async_graphql::Value::from_json(json).ok());

        async_graphql::Error::new(self.public_message()).extend_with(|_, e| {
            e.set("code", code);
            e.set("status", status);
            if let Some(fields) = fields {
                e.set("data", fields);
            }
        })
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
