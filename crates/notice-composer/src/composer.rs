//! The notice workflow.
//!
//! One [`NoticeComposer::run`] call is one invocation of the command:
//!
//! 1. Resolve the target groups.
//! 2. Prompt for the notice and wait for a single reply.
//! 3. Parse and classify the reply, warn about unsupported content.
//! 4. Reject texts outside `1..=600` characters.
//! 5. Stage the image, if any.
//! 6. Send to every group in order, `interval` apart.
//!
//! The composer itself holds only read-only state, so one instance can
//! serve concurrent invocations.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::NoticeConfig;
use crate::content::{ParsedContent, check_length, is_cancel};
use crate::error::{NoticeError, NoticeResult};
use crate::staging::StagedImage;
use crate::targets::resolve_targets;
use notice_core::{ConversationContext, GroupNoticeApi, ImageFetcher, NoticeText};

// =============================================================================
// Outcome
// =============================================================================

/// How an invocation ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user cancelled. Carries the localized `cancelled` message.
    Cancelled(String),
    /// No reply arrived in time. Nothing is reported to the user.
    TimedOut,
    /// The notice text had an invalid length.
    Rejected {
        /// Measured length in characters.
        length: usize,
        /// Localized `length-warn` message.
        message: String,
    },
    /// The notice reached every group.
    Delivered {
        /// Number of groups sent to.
        groups: usize,
        /// Localized `success` message.
        message: String,
    },
}

impl Outcome {
    /// The message the host should show the user, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Cancelled(message)
            | Self::Rejected { message, .. }
            | Self::Delivered { message, .. } => Some(message),
            Self::TimedOut => None,
        }
    }
}

// =============================================================================
// NoticeComposer
// =============================================================================

/// Composes and broadcasts group notices.
#[derive(Clone)]
pub struct NoticeComposer {
    config: NoticeConfig,
    api: Arc<dyn GroupNoticeApi>,
    fetcher: Arc<dyn ImageFetcher>,
}

impl NoticeComposer {
    /// Creates a composer.
    pub fn new(
        config: NoticeConfig,
        api: Arc<dyn GroupNoticeApi>,
        fetcher: Arc<dyn ImageFetcher>,
    ) -> Self {
        Self {
            config,
            api,
            fetcher,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &NoticeConfig {
        &self.config
    }

    /// Runs one invocation.
    ///
    /// `explicit_groups` are the command arguments; `current_group` is the
    /// group the command was issued in, if any.
    ///
    /// # Errors
    /// See [`NoticeError`]. A staged image is removed on every path.
    pub async fn run(
        &self,
        ctx: &dyn ConversationContext,
        explicit_groups: Vec<String>,
        current_group: Option<&str>,
    ) -> NoticeResult<Outcome> {
        let groups = resolve_targets(explicit_groups, current_group)?;

        ctx.send(&ctx.localize(&NoticeText::WhatToAdd))
            .await
            .map_err(NoticeError::Conversation)?;

        let Some(reply) = ctx.prompt(self.config.prompt_timeout()).await else {
            info!(groups = groups.len(), "No reply before timeout, notice abandoned");
            return Ok(Outcome::TimedOut);
        };

        if is_cancel(&reply) {
            info!("Notice cancelled by user");
            return Ok(Outcome::Cancelled(ctx.localize(&NoticeText::Cancelled)));
        }

        let parsed = ParsedContent::parse(&reply);
        if parsed.unsupported_present {
            self.notify(ctx, NoticeText::TypeWarn).await;
        }

        let text = parsed.text();
        let length = match check_length(&text) {
            Ok(length) => length,
            Err(length) => {
                info!(length, "Notice rejected for its length");
                return Ok(Outcome::Rejected {
                    length,
                    message: ctx.localize(&NoticeText::LengthWarn { length }),
                });
            }
        };

        let staged = match &parsed.image {
            Some(source) => Some(
                StagedImage::stage(self.fetcher.as_ref(), source, &self.config.staging_dir)
                    .await?,
            ),
            None => None,
        };

        info!(
            groups = groups.len(),
            length,
            image = staged.is_some(),
            "Dispatching group notice"
        );
        let result = self
            .dispatch(ctx, &groups, &text, staged.as_ref().map(StagedImage::path))
            .await;

        if let Some(staged) = staged {
            staged.release().await;
        }
        result?;

        Ok(Outcome::Delivered {
            groups: groups.len(),
            message: ctx.localize(&NoticeText::Success),
        })
    }

    /// Sends to each group in order, sleeping `interval` before every send
    /// but the first.
    async fn dispatch(
        &self,
        ctx: &dyn ConversationContext,
        groups: &[String],
        text: &str,
        image: Option<&Path>,
    ) -> NoticeResult<()> {
        let interval = self.config.interval();
        for (index, group_id) in groups.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(interval).await;
            }
            self.send_to_group(ctx, index, group_id, text, image)
                .await?;
        }
        Ok(())
    }

    /// Sends one notice. An image send that fails is retried once without
    /// the image.
    async fn send_to_group(
        &self,
        ctx: &dyn ConversationContext,
        index: usize,
        group_id: &str,
        text: &str,
        image: Option<&Path>,
    ) -> NoticeResult<()> {
        if let Some(path) = image {
            match self.api.send_group_notice(group_id, text, Some(path)).await {
                Ok(()) => {
                    info!(group_id = %group_id, index, image = true, "Group notice sent");
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        group_id = %group_id,
                        index,
                        error = %e,
                        "Notice with image failed, retrying text only"
                    );
                    self.notify(ctx, NoticeText::ImgSendFail).await;
                }
            }
        }

        self.api
            .send_group_notice(group_id, text, None)
            .await
            .map_err(|source| NoticeError::RemoteSend {
                group_id: group_id.to_string(),
                source,
            })?;
        info!(
            group_id = %group_id,
            index,
            image = false,
            fallback = image.is_some(),
            "Group notice sent"
        );
        Ok(())
    }

    /// Sends an advisory message. Failures are logged and otherwise ignored.
    async fn notify(&self, ctx: &dyn ConversationContext, text: NoticeText) {
        if let Err(e) = ctx.send(&ctx.localize(&text)).await {
            warn!(key = text.key(), error = %e, "Failed to deliver advisory message");
        }
    }
}
