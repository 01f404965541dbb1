//! Wiring: builds a ready [`NoticeComposer`] from an [`AppConfig`].
//!
//! ```rust,ignore
//! use notice_runtime::{ConfigLoader, NoticeRuntime};
//!
//! let runtime = NoticeRuntime::load(ConfigLoader::new())?;
//! let outcome = runtime.run(&ctx, args, Some("123456")).await?;
//! ```

use std::sync::Arc;

use tracing::{Instrument, info, info_span};

use crate::config::{AppConfig, ConfigLoader, validate_config};
use crate::error::RuntimeResult;
use notice_composer::{NoticeComposer, NoticeResult, Outcome};
use notice_core::{Catalog, ConversationContext};
use notice_onebot::{HttpApiCaller, OneBotClient};
use notice_transport::{HttpClientConfig, HttpImageFetcher, http_post_json};

/// The assembled notice service.
pub struct NoticeRuntime {
    config: AppConfig,
    client: OneBotClient,
    composer: NoticeComposer,
    catalog: Catalog,
}

impl NoticeRuntime {
    /// Loads, validates and wires the configuration.
    pub fn load(loader: ConfigLoader) -> RuntimeResult<Self> {
        Self::from_config(loader.load()?)
    }

    /// Validates `config` and builds the OneBot client, the image fetcher
    /// and the composer.
    pub fn from_config(config: AppConfig) -> RuntimeResult<Self> {
        validate_config(&config)?;

        let mut http = HttpClientConfig::new(config.onebot.api_url.clone());
        http.timeout = config.onebot.timeout();
        http.access_token.clone_from(&config.onebot.access_token);

        let client = OneBotClient::new(Arc::new(HttpApiCaller::new(http_post_json(http)?)));
        let fetcher = HttpImageFetcher::new(config.onebot.timeout())?
            .max_bytes(config.onebot.max_image_bytes);
        let composer = NoticeComposer::new(
            config.notice.clone(),
            Arc::new(client.clone()),
            Arc::new(fetcher),
        );
        let catalog = Catalog::new(config.i18n.locale());

        info!(
            api_url = %config.onebot.api_url,
            interval = config.notice.interval,
            staging_dir = %config.notice.staging_dir.display(),
            locale = %catalog.locale(),
            "Notice runtime ready"
        );

        Ok(Self {
            config,
            client,
            composer,
            catalog,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The OneBot client.
    pub fn client(&self) -> &OneBotClient {
        &self.client
    }

    /// The composer.
    pub fn composer(&self) -> &NoticeComposer {
        &self.composer
    }

    /// The message catalog for the configured locale.
    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Runs one invocation inside a `group_notice` span.
    pub async fn run(
        &self,
        ctx: &dyn ConversationContext,
        explicit_groups: Vec<String>,
        current_group: Option<&str>,
    ) -> NoticeResult<Outcome> {
        let span = info_span!(
            "group_notice",
            explicit = explicit_groups.len(),
            current_group = current_group.unwrap_or("-")
        );
        self.composer
            .run(ctx, explicit_groups, current_group)
            .instrument(span)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::RuntimeError;
    use notice_core::Locale;

    #[test]
    fn test_from_default_config() {
        let runtime = NoticeRuntime::from_config(AppConfig::default()).unwrap();
        assert_eq!(runtime.composer().config().interval, 1.0);
        assert_eq!(runtime.catalog().locale(), Locale::ZhCn);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AppConfig::default();
        config.notice.interval = 0.7;
        let err = NoticeRuntime::from_config(config).err().unwrap();
        assert!(matches!(
            err,
            RuntimeError::Config(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_locale_from_config() {
        let mut config = AppConfig::default();
        config.i18n.locale = "en".into();
        let runtime = NoticeRuntime::from_config(config).unwrap();
        assert_eq!(runtime.catalog().locale(), Locale::EnUs);
    }
}
