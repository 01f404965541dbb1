//! # Notice Composer
//!
//! The interactive group notice workflow: prompt for content, validate it,
//! stage an optional image and broadcast to one or more groups.
//!
//! The composer depends only on the capability traits from `notice-core`;
//! the host supplies the conversation, the OneBot client and the image
//! fetcher.
//!
//! ```rust,ignore
//! use notice_composer::{NoticeComposer, NoticeConfig, Outcome};
//!
//! let composer = NoticeComposer::new(NoticeConfig::default(), api, fetcher);
//! let outcome = composer.run(&ctx, args, Some("123456")).await?;
//! if let Some(msg) = outcome.message() {
//!     ctx.send(msg).await?;
//! }
//! ```

pub mod composer;
pub mod config;
pub mod content;
pub mod error;
pub mod staging;
pub mod targets;

pub use composer::{NoticeComposer, Outcome};
pub use config::{INTERVAL_STEP, MAX_INTERVAL, MIN_INTERVAL, NoticeConfig, is_valid_interval};
pub use content::{
    CANCEL_KEYWORD, ImageSource, MAX_NOTICE_LEN, ParsedContent, check_length, is_cancel,
};
pub use error::{NoticeError, NoticeResult};
pub use staging::StagedImage;
pub use targets::resolve_targets;
