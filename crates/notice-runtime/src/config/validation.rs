//! Configuration validation utilities.

use notice_composer::{INTERVAL_STEP, MAX_INTERVAL, MIN_INTERVAL, NoticeConfig, is_valid_interval};
use notice_core::Locale;

use super::error::{ConfigError, ConfigResult};
use super::schema::{AppConfig, I18nConfig, LogOutput, LoggingConfig, OneBotConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &AppConfig) -> ConfigResult<()> {
    validate_notice_config(&config.notice)?;
    validate_onebot_config(&config.onebot)?;
    validate_logging_config(&config.logging)?;
    validate_i18n_config(&config.i18n)?;
    Ok(())
}

/// Validates workflow settings.
fn validate_notice_config(notice: &NoticeConfig) -> ConfigResult<()> {
    if !is_valid_interval(notice.interval) {
        return Err(ConfigError::validation(format!(
            "notice.interval must be between {MIN_INTERVAL} and {MAX_INTERVAL} seconds \
             in steps of {INTERVAL_STEP}, got {}",
            notice.interval
        )));
    }

    if notice.prompt_timeout_secs == 0 {
        return Err(ConfigError::validation(
            "notice.prompt_timeout_secs must be greater than 0",
        ));
    }

    if notice.staging_dir.as_os_str().is_empty() {
        return Err(ConfigError::validation("notice.staging_dir must not be empty"));
    }

    Ok(())
}

/// Validates the OneBot endpoint.
fn validate_onebot_config(onebot: &OneBotConfig) -> ConfigResult<()> {
    validate_url(&onebot.api_url)?;

    if onebot.timeout_secs == 0 {
        return Err(ConfigError::validation(
            "onebot.timeout_secs must be greater than 0",
        ));
    }

    if onebot.max_image_bytes == 0 {
        return Err(ConfigError::validation(
            "onebot.max_image_bytes must be greater than 0",
        ));
    }

    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::validation(
            "logging.file_path is required when logging.output = \"file\"",
        ));
    }
    Ok(())
}

/// Validates the locale tag.
fn validate_i18n_config(i18n: &I18nConfig) -> ConfigResult<()> {
    i18n.locale
        .parse::<Locale>()
        .map(|_| ())
        .map_err(ConfigError::validation)
}

/// Validates an HTTP(S) URL.
fn validate_url(url: &str) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::invalid_url(url, "URL must not be empty"));
    }

    let valid_schemes = ["http://", "https://"];
    if !valid_schemes.iter().any(|s| url.starts_with(s)) {
        return Err(ConfigError::invalid_url(
            url,
            format!("URL must start with one of: {valid_schemes:?}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_interval() {
        let mut config = AppConfig::default();
        for bad in [0.0, 0.3, 1.25, 10.5] {
            config.notice.interval = bad;
            assert!(
                matches!(validate_config(&config), Err(ConfigError::ValidationError { .. })),
                "{bad}"
            );
        }
        config.notice.interval = 9.5;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_prompt_timeout() {
        let mut config = AppConfig::default();
        config.notice.prompt_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_api_url() {
        let mut config = AppConfig::default();
        config.onebot.api_url = "ws://127.0.0.1:6700".into();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidUrl { .. })
        ));
        config.onebot.api_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_locale() {
        let mut config = AppConfig::default();
        config.i18n.locale = "en_US".into();
        assert!(validate_config(&config).is_ok());
        config.i18n.locale = "fr-FR".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_file_output_needs_path() {
        let mut config = AppConfig::default();
        config.logging.output = LogOutput::File;
        assert!(validate_config(&config).is_err());
        config.logging.file_path = Some(PathBuf::from("logs/notice.log"));
        assert!(validate_config(&config).is_ok());
    }
}
