//! Command matching for the `group-notice` command.
//!
//! ```text
//! group-notice [group_id ...]
//! 发公告 [group_id ...]
//! ```
//!
//! Both spellings accept an optional `/` prefix. Arguments are split with
//! shell rules, so quoted ids survive intact. No validation is applied to
//! the ids; they are passed through to target resolution in order.

use serde::{Deserialize, Serialize};

/// Primary command name.
pub const COMMAND_NAME: &str = "group-notice";

/// Alias for the primary command name.
pub const COMMAND_ALIAS: &str = "发公告";

/// Authority a user needs to issue the command.
pub const MIN_AUTHORITY: u8 = 3;

// =============================================================================
// Member role
// =============================================================================

/// A OneBot group member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
}

impl MemberRole {
    /// Parses the OneBot `sender.role` string.
    pub fn from_onebot(role: &str) -> Option<Self> {
        match role {
            "owner" => Some(Self::Owner),
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            _ => None,
        }
    }

    /// Authority level granted by this role.
    pub fn authority(self) -> u8 {
        match self {
            Self::Owner => 4,
            Self::Admin => 3,
            Self::Member => 1,
        }
    }
}

// =============================================================================
// NoticeCommand
// =============================================================================

/// A parsed `group-notice` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeCommand {
    /// Explicit target groups, in the order given.
    pub groups: Vec<String>,
}

impl NoticeCommand {
    /// Parses a message as a `group-notice` command.
    ///
    /// Returns `None` if the message does not start with the command name or
    /// its alias.
    pub fn parse(text: &str) -> Option<Self> {
        let mut args = shell_split(text.trim()).into_iter();
        let head = args.next()?;
        let name = head.strip_prefix('/').unwrap_or(&head);
        if name != COMMAND_NAME && name != COMMAND_ALIAS {
            return None;
        }

        Some(Self {
            groups: args.collect(),
        })
    }

    /// Whether a member with `role` may issue the command.
    ///
    /// Hosts with their own permission gate should use that instead.
    pub fn permits(role: MemberRole) -> bool {
        role.authority() >= MIN_AUTHORITY
    }
}

/// Simple shell-like argument splitting.
///
/// Handles whitespace separation, single and double quotes, and backslash
/// escapes inside double quotes.
pub fn shell_split(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut escape_next = false;

    for ch in input.chars() {
        if escape_next {
            current.push(ch);
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_double_quote => escape_next = true,
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            c if c.is_whitespace() && !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}
