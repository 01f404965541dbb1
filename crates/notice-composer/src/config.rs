//! Workflow configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest accepted send interval, in seconds.
pub const MIN_INTERVAL: f64 = 0.5;
/// Largest accepted send interval, in seconds.
pub const MAX_INTERVAL: f64 = 10.0;
/// Granularity of the send interval, in seconds.
pub const INTERVAL_STEP: f64 = 0.5;

/// Configuration of a [`NoticeComposer`](crate::NoticeComposer).
///
/// Immutable once the composer is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// Seconds to wait between two consecutive group sends.
    pub interval: f64,
    /// How long to wait for the user's reply, in seconds.
    pub prompt_timeout_secs: u64,
    /// Directory that receives downloaded images.
    pub staging_dir: PathBuf,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            interval: 1.0,
            prompt_timeout_secs: 60,
            staging_dir: PathBuf::from("./tmp"),
        }
    }
}

impl NoticeConfig {
    /// The delay between consecutive sends.
    ///
    /// Negative or non-finite values collapse to zero.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval).unwrap_or(Duration::ZERO)
    }

    /// The reply timeout.
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs)
    }
}

/// Whether `secs` is an accepted send interval: within
/// [`MIN_INTERVAL`]..=[`MAX_INTERVAL`] and a multiple of [`INTERVAL_STEP`].
pub fn is_valid_interval(secs: f64) -> bool {
    if !(MIN_INTERVAL..=MAX_INTERVAL).contains(&secs) {
        return false;
    }
    let steps = secs / INTERVAL_STEP;
    (steps - steps.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NoticeConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.prompt_timeout(), Duration::from_secs(60));
        assert!(is_valid_interval(config.interval));
    }

    #[test]
    fn test_interval_bounds_and_step() {
        for ok in [0.5, 1.0, 2.5, 10.0] {
            assert!(is_valid_interval(ok), "{ok}");
        }
        for bad in [0.0, 0.25, 1.2, 10.5, -1.0, f64::NAN] {
            assert!(!is_valid_interval(bad), "{bad}");
        }
    }

    #[test]
    fn test_negative_interval_is_zero() {
        let config = NoticeConfig {
            interval: -3.0,
            ..Default::default()
        };
        assert_eq!(config.interval(), Duration::ZERO);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: NoticeConfig = serde_json::from_str(r#"{"interval": 2.5}"#).unwrap();
        assert_eq!(config.interval, 2.5);
        assert_eq!(config.prompt_timeout_secs, 60);
        assert_eq!(config.staging_dir, PathBuf::from("./tmp"));
    }
}
