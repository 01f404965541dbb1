//! Capability interfaces consumed by the notice workflow.
//!
//! The workflow never talks to a chat backend, the OneBot API or the
//! network directly. Everything it needs from the outside world is one of
//! these traits, injected by the host:
//!
//! | Trait | Provided by |
//! |-------|-------------|
//! | [`ConversationContext`] | The host session (prompt, reply, localization) |
//! | [`GroupNoticeApi`] | The OneBot client |
//! | [`ImageFetcher`] | The HTTP transport |

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::{ApiResult, FetchResult, TransportResult};
use crate::i18n::NoticeText;

/// Transport-supplied closure that posts a JSON body and returns the JSON
/// response. Captures the endpoint URL and any authentication.
pub type PostJsonFn = Arc<dyn Fn(Value) -> BoxFuture<'static, TransportResult<Value>> + Send + Sync>;

/// The conversation an invocation runs in.
///
/// Bound to one user in one chat: replies awaited by [`prompt`] come from
/// the same user who issued the command.
///
/// [`prompt`]: ConversationContext::prompt
#[async_trait]
pub trait ConversationContext: Send + Sync {
    /// Waits for the user's next message.
    ///
    /// Returns the raw (CQ-coded) reply text, or `None` if nothing arrived
    /// within `timeout`.
    async fn prompt(&self, timeout: Duration) -> Option<String>;

    /// Sends a message back into the conversation.
    async fn send(&self, message: &str) -> ApiResult<()>;

    /// Renders a notice text in the conversation's locale.
    fn localize(&self, text: &NoticeText) -> String;
}

/// Remote capability for publishing a group notice.
#[async_trait]
pub trait GroupNoticeApi: Send + Sync {
    /// Publishes `content` as a notice in `group_id`, optionally with a local
    /// image attached.
    async fn send_group_notice(
        &self,
        group_id: &str,
        content: &str,
        image: Option<&Path>,
    ) -> ApiResult<()>;
}

/// Downloads a remote resource as raw bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Performs an HTTP GET on `url` and returns the body.
    async fn fetch(&self, url: &str) -> FetchResult<Vec<u8>>;
}
