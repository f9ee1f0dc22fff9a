//! # Client Error Types
//!
//! Unified error handling for credential resolution and GA4 API calls.

use thiserror::Error;

use crate::auth::SETUP_GUIDE;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
    /// No usable service-account credential. Displays the setup guide.
    #[error("{}", SETUP_GUIDE)]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Invalid {kind} '{value}'. Valid values: {valid}")]
    InvalidEnum {
        kind: &'static str,
        value: String,
        valid: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Create an API error from HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create an enum lookup error listing the accepted names.
    pub fn invalid_enum(kind: &'static str, value: impl Into<String>, valid: &[&str]) -> Self {
        Self::InvalidEnum {
            kind,
            value: value.into(),
            valid: valid.join(", "),
        }
    }

    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ClientError::NotConfigured)
    }

    /// Stable machine-readable code for structured error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NotConfigured => "not_configured",
            ClientError::HttpError(_) => "http_error",
            ClientError::SerializationError(_) => "serialization_error",
            ClientError::ApiError { .. } => "api_error",
            ClientError::AuthError(_) => "auth_error",
            ClientError::InvalidEnum { .. } => "invalid_enum",
            ClientError::Internal(_) => "internal_error",
        }
    }
}
