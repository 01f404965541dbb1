//! HTTP transport for the group notice broadcaster.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`http_post_json`] | Builds the [`PostJsonFn`](notice_core::PostJsonFn) used to call the OneBot HTTP API |
//! | [`HttpImageFetcher`] | Downloads images referenced by a notice |

mod fetch;
mod http_client;

pub use fetch::{DEFAULT_MAX_BYTES, HttpImageFetcher};
pub use http_client::{HttpClientConfig, http_post_json};
