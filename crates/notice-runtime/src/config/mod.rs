//! Configuration for the notice runtime.
//!
//! Layered loading with figment, the [`AppConfig`] schema and validation.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    AppConfig, I18nConfig, LogFormat, LogLevel, LogOutput, LoggingConfig, OneBotConfig,
};
pub use validation::validate_config;
