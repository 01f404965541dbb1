//! Notice Console
//!
//! Runs one `group-notice` invocation against a OneBot HTTP API, with the
//! terminal standing in for the chat session: prompts are printed to stdout
//! and the reply is read from stdin.
//!
//! The reply may span several lines and ends at an empty line or EOF. CQ
//! codes are accepted, e.g.
//! `Hello[CQ:image,file=a.png,url=https://example.com/a.png]`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package notice-console -- --group 123456 --group 654321
//! cargo run --package notice-console -- --current-group 123456 --locale en
//! cargo run --package notice-console -- "/发公告 123456 654321" --role admin
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use tracing::{error, info};

use notice_core::{ApiResult, Catalog, ConversationContext, NoticeText};
use notice_onebot::{MIN_AUTHORITY, MemberRole, NoticeCommand};
use notice_runtime::{ConfigLoader, NoticeRuntime, logging};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "notice-console", version, about)]
struct Cli {
    /// Command line in chat syntax, e.g. "group-notice 123 456".
    command: Option<String>,

    /// Configuration file (TOML, or YAML with the `yaml-config` feature).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration profile, overriding NOTICE_PROFILE.
    #[arg(long)]
    profile: Option<String>,

    /// Target group; repeat for several groups.
    #[arg(short, long = "group", value_name = "GROUP_ID")]
    groups: Vec<String>,

    /// Group the command is issued in, used when no group is given.
    #[arg(long, value_name = "GROUP_ID")]
    current_group: Option<String>,

    /// Locale for messages (zh-CN, en-US).
    #[arg(long)]
    locale: Option<String>,

    /// OneBot role of the issuing user (owner, admin, member).
    #[arg(long)]
    role: Option<String>,
}

// ============================================================================
// Terminal Conversation
// ============================================================================

/// A conversation on stdin/stdout.
struct ConsoleConversation {
    catalog: Catalog,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleConversation {
    fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Reads lines up to an empty line or EOF.
    async fn read_reply(&self) -> Option<String> {
        let mut lines = self.lines.lock().await;
        let mut reply: Vec<String> = Vec::new();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => break,
                Ok(Some(line)) => reply.push(line),
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read from stdin");
                    break;
                }
            }
        }
        (!reply.is_empty()).then(|| reply.join("\n"))
    }
}

#[async_trait]
impl ConversationContext for ConsoleConversation {
    async fn prompt(&self, timeout: Duration) -> Option<String> {
        tokio::time::timeout(timeout, self.read_reply())
            .await
            .ok()
            .flatten()
    }

    async fn send(&self, message: &str) -> ApiResult<()> {
        println!("bot> {message}");
        Ok(())
    }

    fn localize(&self, text: &NoticeText) -> String {
        self.catalog.render(text)
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.file(path);
    }
    if let Some(profile) = &cli.profile {
        loader = loader.profile(profile);
    }
    if let Some(locale) = &cli.locale {
        loader = loader.set("i18n.locale", locale);
    }
    let config = loader.load().context("failed to load configuration")?;
    logging::init_from_config(&config.logging);

    if let Some(role) = &cli.role {
        let role = MemberRole::from_onebot(role)
            .with_context(|| format!("unknown role: {role}"))?;
        if !NoticeCommand::permits(role) {
            bail!("role {role:?} lacks authority {MIN_AUTHORITY}");
        }
    }

    let mut groups = cli.groups;
    if let Some(line) = &cli.command {
        let command = NoticeCommand::parse(line)
            .with_context(|| format!("not a group-notice command: {line:?}"))?;
        groups.extend(command.groups);
    }

    let runtime = NoticeRuntime::from_config(config)?;
    let ctx = ConsoleConversation::new(runtime.catalog());

    match runtime
        .run(&ctx, groups, cli.current_group.as_deref())
        .await
    {
        Ok(outcome) => {
            match outcome.message() {
                Some(message) => ctx.send(message).await?,
                None => info!("No reply received, nothing was sent"),
            }
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Group notice failed");
            Err(e.into())
        }
    }
}
