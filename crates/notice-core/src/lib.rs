//! # Notice Core
//!
//! Foundation types for the group notice broadcaster:
//!
//! - [`message`]: rich-content segments and the CQ-code parser
//! - [`capability`]: the traits the workflow consumes
//!   ([`ConversationContext`], [`GroupNoticeApi`], [`ImageFetcher`])
//! - [`i18n`]: user-facing texts and their built-in templates
//! - [`error`]: transport, API and download errors

pub mod capability;
pub mod error;
pub mod i18n;
pub mod message;

pub use capability::{ConversationContext, GroupNoticeApi, ImageFetcher, PostJsonFn};
pub use error::{
    ApiError, ApiResult, FetchError, FetchResult, TransportError, TransportResult,
};
pub use i18n::{Catalog, Locale, NoticeText};
pub use message::{
    ImageData, OtherData, RichMessage, Segment, TextData, escape_cq_text, escape_cq_value,
    parse_cq_string, unescape_cq_text, unescape_cq_value,
};
