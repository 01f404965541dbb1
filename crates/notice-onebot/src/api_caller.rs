//! Transport-specific [`ApiCaller`] implementations for OneBot v11.
//!
//! [`OneBotClient`](crate::client::OneBotClient) holds an `Arc<dyn ApiCaller>`
//! and never learns which transport carries the request. Only the HTTP
//! client transport is provided here: the request body is POSTed and the
//! HTTP response body is the API response.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use notice_core::{ApiError, ApiResult, PostJsonFn};

// =============================================================================
// ApiCaller trait
// =============================================================================

/// Transport-specific API call mechanism.
#[async_trait]
pub trait ApiCaller: Send + Sync {
    /// Makes an API call and returns the raw response envelope.
    ///
    /// # Arguments
    /// * `action` – Protocol action name (e.g. `"_send_group_notice"`).
    /// * `params` – JSON parameters for the action.
    ///
    /// # Errors
    /// Returns an [`ApiError`] if the request could not be delivered.
    /// Protocol-level failures (`retcode != 0`) are checked by the caller.
    async fn call(&self, _action: &str, _params: Value) -> ApiResult<Value> {
        Err(ApiError::NotSupported)
    }
}

// =============================================================================
// DisabledApiCaller
// =============================================================================

/// [`ApiCaller`] that refuses every call.
///
/// Useful for dry runs: the workflow runs to the dispatch step and every send
/// fails with [`ApiError::NotSupported`].
pub struct DisabledApiCaller;

#[async_trait]
impl ApiCaller for DisabledApiCaller {}

// =============================================================================
// HttpApiCaller
// =============================================================================

/// [`ApiCaller`] for the OneBot HTTP API.
///
/// Delegates every call to the `post_json` closure supplied by the transport
/// layer, which already captures the URL and authentication.
pub struct HttpApiCaller {
    post_json: PostJsonFn,
}

impl HttpApiCaller {
    /// Creates a new `HttpApiCaller`.
    pub fn new(post_json: PostJsonFn) -> Self {
        Self { post_json }
    }
}

#[async_trait]
impl ApiCaller for HttpApiCaller {
    async fn call(&self, action: &str, params: Value) -> ApiResult<Value> {
        let body = json!({
            "action": action,
            "params": params,
        });

        debug!(action = %action, "Calling OneBot API via HTTP");

        Ok((self.post_json)(body).await?)
    }
}
