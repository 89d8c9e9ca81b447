//! Unified error types for the catalog layers.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the catalog.
///
/// A missing document is deliberately absent from this enum: lookups that
/// match nothing return [`crate::Lookup::NotFound`] instead.
#[derive(Error, Debug)]
pub enum CatalogError {
    // ============ Request Errors ============
    /// A request parameter is outside its domain.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        name: &'static str,
        message: String,
    },

    // ============ Infrastructure Errors ============
    /// The search backend is unreachable or failed transiently.
    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The search backend refused the request (non-transient).
    #[error("Search backend rejected request: {0}")]
    BackendRejected(String),

    /// The cache store is unreachable or failed.
    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error (cache entries, backend documents)
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidParameter { .. } => 400,
            Self::BackendUnavailable(_) | Self::BackendRejected(_) | Self::Timeout(_) => 503,
            Self::CacheUnavailable(_)
            | Self::Configuration(_)
            | Self::Serialization(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::BackendUnavailable(_) | Self::BackendRejected(_) => "BACKEND_UNAVAILABLE",
            Self::CacheUnavailable(_) => "CACHE_UNAVAILABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter<T: Into<String>>(name: &'static str, message: T) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Creates a backend unavailable error.
    #[must_use]
    pub fn backend_unavailable<T: Into<String>>(message: T) -> Self {
        Self::BackendUnavailable(message.into())
    }

    /// Creates a cache unavailable error.
    #[must_use]
    pub fn cache_unavailable<T: Into<String>>(message: T) -> Self {
        Self::CacheUnavailable(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error is retriable.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::BackendUnavailable(_) | Self::Timeout(_))
    }

    /// Folds any failure of a search backend call into `BackendUnavailable`.
    ///
    /// Parameter errors pass through untouched; callers must be able to tell
    /// a bad request apart from an unreachable index.
    #[must_use]
    pub fn into_backend_failure(self) -> Self {
        match self {
            Self::InvalidParameter { .. } | Self::BackendUnavailable(_) => self,
            Self::BackendRejected(message)
            | Self::Timeout(message)
            | Self::Serialization(message)
            | Self::CacheUnavailable(message)
            | Self::Configuration(message)
            | Self::Internal(message) => Self::BackendUnavailable(message),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response handed to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CatalogError`.
    #[must_use]
    pub fn from_error(error: &CatalogError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

impl From<&CatalogError> for ErrorResponse {
    fn from(error: &CatalogError) -> Self {
        Self::from_error(error)
    }
}
