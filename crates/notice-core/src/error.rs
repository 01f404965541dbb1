//! Unified error types for the notice core.
//!
//! Workflow-level errors (like `NoticeError`) are defined in `notice-composer`.

use thiserror::Error;

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors that can occur in transport operations.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {url} - {reason}")]
    ConnectionFailed {
        /// The URL that failed to connect.
        url: String,
        /// Reason for failure.
        reason: String,
    },

    /// Request failed with a non-success HTTP status.
    #[error("HTTP {status} error: {body}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Response body, if any could be read.
        body: String,
    },

    /// Invalid configuration.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// =============================================================================
// API Errors
// =============================================================================

/// Error type for API calls.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The bot is not connected.
    #[error("bot is not connected")]
    NotConnected,
    /// The API call timed out.
    #[error("API call timed out")]
    Timeout,
    /// The API returned an error.
    #[error("API error ({retcode}): {message}")]
    ApiError { retcode: i64, message: String },
    /// Failed to serialize/deserialize.
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// Transport error.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The action is not supported by this caller.
    #[error("API call not supported")]
    NotSupported,
    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors raised while downloading a remote resource.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The URL is not something we can fetch.
    #[error("unsupported resource URL: {0}")]
    UnsupportedUrl(String),
    /// The resource exceeds the configured size limit.
    #[error("resource too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Actual or announced size in bytes.
        size: u64,
        /// The configured limit in bytes.
        limit: u64,
    },
    /// The download itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for resource downloads.
pub type FetchResult<T> = Result<T, FetchError>;
