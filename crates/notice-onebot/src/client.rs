//! OneBot v11 client.
//!
//! `OneBotClient` owns an [`ApiCaller`] and turns raw response envelopes
//! into typed results. It implements [`GroupNoticeApi`] through the
//! `_send_group_notice` extension action understood by go-cqhttp, NapCat and
//! Lagrange.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notice_onebot::{HttpApiCaller, OneBotClient};
//!
//! let client = OneBotClient::new(Arc::new(HttpApiCaller::new(post_json)));
//! client.send_group_notice("123456", "Hello", None).await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, trace};

use crate::api_caller::ApiCaller;
use notice_core::{ApiError, ApiResult, GroupNoticeApi};

// =============================================================================
// OneBotClient
// =============================================================================

/// A OneBot v11 API client.
#[derive(Clone)]
pub struct OneBotClient {
    caller: Arc<dyn ApiCaller>,
}

impl OneBotClient {
    /// Creates a client over the given caller.
    pub fn new(caller: Arc<dyn ApiCaller>) -> Self {
        Self { caller }
    }

    /// Calls `action` and returns the `data` field of a successful response.
    ///
    /// A response with a non-zero `retcode` or `status == "failed"` becomes
    /// [`ApiError::ApiError`].
    pub async fn call_api(&self, action: &str, params: Value) -> ApiResult<Value> {
        debug!(action = %action, "Calling OneBot API");
        trace!(params = %params, "API request");

        let response = self.caller.call(action, params).await?;
        trace!(response = %response, "API response");

        check_response(response)
    }

    /// Publishes a group notice.
    ///
    /// # Arguments
    /// * `group_id` - Target group number
    /// * `content` - Notice text
    /// * `image` - Optional image, as a path or URI the implementation can read
    pub async fn send_group_notice_raw(
        &self,
        group_id: i64,
        content: &str,
        image: Option<&str>,
    ) -> ApiResult<()> {
        let mut params = json!({
            "group_id": group_id,
            "content": content,
        });
        if let Some(img) = image {
            params["image"] = json!(img);
        }

        self.call_api("_send_group_notice", params).await?;
        Ok(())
    }
}

/// Checks a OneBot response envelope and extracts its `data`.
fn check_response(response: Value) -> ApiResult<Value> {
    let retcode = response.get("retcode").and_then(Value::as_i64).unwrap_or(0);
    let failed = response.get("status").and_then(Value::as_str) == Some("failed");

    if retcode != 0 || failed {
        let message = response
            .get("message")
            .or_else(|| response.get("wording"))
            .or_else(|| response.get("msg"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        return Err(ApiError::ApiError { retcode, message });
    }

    Ok(response.get("data").cloned().unwrap_or(response))
}

/// Renders a local file as a `file://` URI.
fn file_uri(path: &Path) -> String {
    let display = path.to_string_lossy();
    if display.starts_with('/') {
        format!("file://{display}")
    } else {
        // Windows paths: file:///C:/...
        format!("file:///{}", display.replace('\\', "/"))
    }
}

#[async_trait]
impl GroupNoticeApi for OneBotClient {
    async fn send_group_notice(
        &self,
        group_id: &str,
        content: &str,
        image: Option<&Path>,
    ) -> ApiResult<()> {
        let id = group_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Other(format!("invalid group id: {group_id:?}")))?;
        let image = image.map(file_uri);

        self.send_group_notice_raw(id, content, image.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;

    /// Records every call and answers with a fixed response.
    struct RecordingCaller {
        calls: Mutex<Vec<(String, Value)>>,
        response: Value,
    }

    impl RecordingCaller {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response,
            })
        }
    }

    #[async_trait]
    impl ApiCaller for RecordingCaller {
        async fn call(&self, action: &str, params: Value) -> ApiResult<Value> {
            self.calls.lock().push((action.to_string(), params));
            Ok(self.response.clone())
        }
    }

    #[test]
    fn test_check_response_ok() {
        let data = check_response(json!({
            "status": "ok",
            "retcode": 0,
            "data": {"message_id": 7}
        }))
        .unwrap();
        assert_eq!(data["message_id"], 7);
    }

    #[test]
    fn test_check_response_retcode() {
        let err = check_response(json!({
            "status": "failed",
            "retcode": 100,
            "wording": "group not found"
        }))
        .unwrap_err();
        match err {
            ApiError::ApiError { retcode, message } => {
                assert_eq!(retcode, 100);
                assert_eq!(message, "group not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_check_response_failed_status_without_retcode() {
        let err = check_response(json!({"status": "failed", "message": "boom"})).unwrap_err();
        assert!(matches!(err, ApiError::ApiError { retcode: 0, ref message } if message == "boom"));
    }

    #[test]
    fn test_file_uri() {
        assert_eq!(file_uri(Path::new("/tmp/a.png")), "file:///tmp/a.png");
    }

    #[tokio::test]
    async fn test_send_group_notice_params() {
        let caller = RecordingCaller::new(json!({"status": "ok", "retcode": 0, "data": null}));
        let client = OneBotClient::new(caller.clone());

        client
            .send_group_notice("123456", "Hello\nWorld", Some(Path::new("/tmp/x.png")))
            .await
            .unwrap();
        client
            .send_group_notice("654321", "Text only", None)
            .await
            .unwrap();

        let calls = caller.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "_send_group_notice");
        assert_eq!(
            calls[0].1,
            json!({"group_id": 123456, "content": "Hello\nWorld", "image": "file:///tmp/x.png"})
        );
        assert_eq!(calls[1].1, json!({"group_id": 654321, "content": "Text only"}));
    }

    #[tokio::test]
    async fn test_send_group_notice_rejects_bad_id() {
        let caller = RecordingCaller::new(json!({"retcode": 0}));
        let client = OneBotClient::new(caller.clone());

        let err = client
            .send_group_notice("not-a-group", "Hi", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Other(_)));
        assert!(caller.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_send_group_notice_api_failure() {
        let caller = RecordingCaller::new(json!({"status": "failed", "retcode": 1404}));
        let client = OneBotClient::new(caller);

        let err = client.send_group_notice("1", "Hi", None).await.unwrap_err();
        assert!(matches!(err, ApiError::ApiError { retcode: 1404, .. }));
    }
}
