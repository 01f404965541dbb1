//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use notice_core::TransportError;

/// Errors that can occur while assembling the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An HTTP client could not be built.
    #[error("Failed to set up HTTP transport: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
