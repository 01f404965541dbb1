//! OneBot v11 support for the group notice broadcaster.
//!
//! # Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`api_caller`] | [`ApiCaller`] trait and the HTTP caller |
//! | [`client`] | [`OneBotClient`], implementing [`GroupNoticeApi`](notice_core::GroupNoticeApi) |
//! | [`command`] | `group-notice` / `发公告` matching and role authority |

pub mod api_caller;
pub mod client;
pub mod command;

pub use api_caller::{ApiCaller, DisabledApiCaller, HttpApiCaller};
pub use client::OneBotClient;
pub use command::{
    COMMAND_ALIAS, COMMAND_NAME, MIN_AUTHORITY, MemberRole, NoticeCommand, shell_split,
};
