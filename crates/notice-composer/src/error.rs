//! Workflow errors.
//!
//! Cancellation, timeouts and rejected content are ordinary
//! [`Outcome`](crate::Outcome)s; only the conditions below abort an
//! invocation with an error.

use thiserror::Error;

use notice_core::ApiError;

/// Errors that abort a notice invocation.
#[derive(Debug, Error)]
pub enum NoticeError {
    /// No explicit groups were given and the command was not issued in a
    /// group.
    #[error("no target group: pass group ids or run the command inside a group")]
    NoTargetGroup,

    /// The prompt could not be delivered to the user.
    #[error("failed to reach the user: {0}")]
    Conversation(#[source] ApiError),

    /// The image could not be downloaded or written to the staging
    /// directory. Nothing was sent.
    #[error("failed to stage image {url}: {reason}")]
    ImageStaging {
        /// Source URL of the image.
        url: String,
        /// What went wrong.
        reason: String,
    },

    /// A notice could not be published and no fallback applied. Groups after
    /// this one were not attempted.
    #[error("failed to send notice to group {group_id}: {source}")]
    RemoteSend {
        /// The group whose send failed.
        group_id: String,
        /// The underlying API error.
        #[source]
        source: ApiError,
    },
}

/// Result type for the notice workflow.
pub type NoticeResult<T> = Result<T, NoticeError>;
