//! Configuration schema definitions.
//!
//! ```toml
//! [notice]
//! interval = 1.0
//! prompt_timeout_secs = 60
//! staging_dir = "./tmp"
//!
//! [onebot]
//! api_url = "http://127.0.0.1:5700"
//! access_token = "secret"
//! timeout_secs = 30
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! output = "stdout"
//!
//! [logging.filters]
//! notice_onebot = "debug"
//!
//! [i18n]
//! locale = "zh-CN"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use notice_composer::NoticeConfig;
use notice_core::Locale;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workflow settings.
    #[serde(default)]
    pub notice: NoticeConfig,

    /// OneBot HTTP API settings.
    #[serde(default)]
    pub onebot: OneBotConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Localization settings.
    #[serde(default)]
    pub i18n: I18nConfig,
}

// =============================================================================
// OneBot
// =============================================================================

/// OneBot HTTP API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneBotConfig {
    /// Base URL of the OneBot HTTP API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Access token for authentication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Request timeout in seconds, for API calls and image downloads.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest image accepted for staging, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
}

impl Default for OneBotConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}

impl OneBotConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_api_url() -> String {
    "http://127.0.0.1:5700".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_image_bytes() -> u64 {
    notice_transport::DEFAULT_MAX_BYTES
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a [`tracing::Level`].
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    #[cfg(feature = "json-log")]
    Json,
}

/// Log destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    /// Writes to [`LoggingConfig::file_path`].
    File,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level.
    pub level: LogLevel,
    /// Line format.
    pub format: LogFormat,
    /// Destination.
    pub output: LogOutput,
    /// Log file, for `output = "file"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    /// Include thread ids.
    pub thread_ids: bool,
    /// Include source file and line.
    pub file_location: bool,
    /// Per-module levels, e.g. `notice_onebot = "debug"`.
    pub filters: BTreeMap<String, LogLevel>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            thread_ids: false,
            file_location: false,
            filters: BTreeMap::new(),
        }
    }
}

// =============================================================================
// I18n
// =============================================================================

/// Localization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale tag, e.g. `zh-CN` or `en`.
    pub locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default().as_str().to_string(),
        }
    }
}

impl I18nConfig {
    /// The configured locale, or the default if the tag is not recognised.
    pub fn locale(&self) -> Locale {
        self.locale.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_schema() {
        let yaml = r#"
notice:
  interval: 2.5
  staging_dir: /var/tmp/notice
onebot:
  api_url: https://bot.example.com
  access_token: secret
logging:
  level: debug
  output: stderr
  filters:
    notice_onebot: trace
i18n:
  locale: en
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.notice.interval, 2.5);
        assert_eq!(config.notice.prompt_timeout_secs, 60);
        assert_eq!(config.notice.staging_dir, PathBuf::from("/var/tmp/notice"));
        assert_eq!(config.onebot.access_token.as_deref(), Some("secret"));
        assert_eq!(config.onebot.timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.output, LogOutput::Stderr);
        assert_eq!(config.logging.filters["notice_onebot"], LogLevel::Trace);
        assert_eq!(config.i18n.locale(), Locale::EnUs);
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("logging:\n  level: loud\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.onebot.api_url, "http://127.0.0.1:5700");
        assert_eq!(config.logging.level.as_str(), "info");
        assert_eq!(config.i18n.locale(), Locale::ZhCn);
    }
}
