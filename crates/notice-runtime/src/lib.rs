//! Notice Runtime - configuration, logging and wiring.
//!
//! This crate provides:
//! - Layered configuration loading ([`ConfigLoader`]) and validation
//! - Logging setup ([`LoggingBuilder`], [`logging::init_from_config`])
//! - [`NoticeRuntime`], which turns a configuration into a ready composer
//!   talking to a OneBot HTTP API
//!
//! ```ignore
//! use notice_runtime::{ConfigLoader, NoticeRuntime, logging};
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! let runtime = NoticeRuntime::from_config(config)?;
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod runtime;

pub use config::{AppConfig, ConfigError, ConfigLoader, ConfigResult, Profile};
pub use error::{RuntimeError, RuntimeResult};
pub use logging::LoggingBuilder;
pub use runtime::NoticeRuntime;

// Re-export tracing for use by hosts
pub use tracing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use notice_composer::{NoticeComposer, NoticeConfig, NoticeError, Outcome};
    pub use notice_core::{Catalog, ConversationContext, Locale, NoticeText};
    pub use tracing::{debug, error, info, warn};
}
