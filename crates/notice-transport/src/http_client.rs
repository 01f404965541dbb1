//! OneBot HTTP API client transport.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use reqwest::ClientBuilder;
use tracing::info;

use notice_core::{PostJsonFn, TransportError, TransportResult};

/// Configuration for the OneBot HTTP API endpoint.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL of the OneBot HTTP API, e.g. `http://127.0.0.1:5700`.
    pub api_url: String,
    /// Optional access token, sent as a bearer token.
    pub access_token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HttpClientConfig {
    /// Creates a config for `api_url` with a 30 second timeout.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            access_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Builds a [`PostJsonFn`] that POSTs JSON bodies to the OneBot HTTP API.
///
/// The body is the usual `{"action": ..., "params": ...}` envelope; it is
/// posted to the base URL, which every OneBot v11 HTTP implementation
/// accepts. Non-2xx statuses become [`TransportError::Status`].
pub fn http_post_json(config: HttpClientConfig) -> TransportResult<PostJsonFn> {
    info!(url = %config.api_url, "Creating OneBot HTTP API client");

    let client = ClientBuilder::new()
        .timeout(config.timeout)
        .build()
        .map_err(|e| TransportError::InvalidConfig(e.to_string()))?;
    let url: Arc<str> = config.api_url.into();
    let token: Option<Arc<str>> = config.access_token.map(Into::into);

    let post_json: PostJsonFn = Arc::new(move |body| {
        let client = client.clone();
        let url = url.clone();
        let token = token.clone();
        async move {
            let mut req = client.post(&*url).json(&body);
            if let Some(t) = &token {
                req = req.bearer_auth(t);
            }
            let resp = req.send().await.map_err(|e| TransportError::ConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            let status = resp.status();
            if !status.is_success() {
                let text = resp.text().await.unwrap_or_default();
                return Err(TransportError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            resp.json()
                .await
                .map_err(|e| TransportError::Io(e.to_string()))
        }
        .boxed()
    });

    Ok(post_json)
}
