//! Assistant engine for Nuri chat.
//!
//! Drives one user utterance through the hosted assistant-threads API with:
//! - Lazy thread creation and a reusable per-session thread handle
//! - Run polling with bounded replacement retries and a wall-clock timeout
//! - Reply normalization (citation markers, time markers, punctuation)
//! - Bounded continuation of truncated replies

pub mod normalize;
pub mod openai;
pub mod poll;
pub mod session;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

pub use openai::{OpenAiBackend, OpenAiConfig};
pub use poll::PollPolicy;
pub use session::ConversationSession;

/// Transport seam over the five thread/run operations the session depends on.
/// Implemented by [`OpenAiBackend`] for the real service and by scripted
/// fakes in tests.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Create a new conversation thread, returning its identifier.
    async fn create_thread(&self) -> Result<String, AssistantError>;

    /// Append a message to a thread.
    async fn append_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<(), AssistantError>;

    /// Start a run of the configured assistant against a thread.
    async fn create_run(&self, thread_id: &str) -> Result<Run, AssistantError>;

    /// Fetch the current status of a run.
    async fn run_status(&self, thread_id: &str, run_id: &str)
        -> Result<RunStatus, AssistantError>;

    /// Fetch a thread's messages, newest first.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Lifecycle states of a run, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Completed,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transient handle for one assistant invocation.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: String,
    pub status: RunStatus,
}

/// One thread message, reduced to the text of its content parts.
#[derive(Debug, Clone)]
pub struct ThreadMessage {
    pub role: Role,
    pub content: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("transport error: HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("run {status} after {replacements} replacement runs")]
    RunFailed {
        status: RunStatus,
        replacements: u32,
    },

    #[error("run timed out after {0:?}")]
    Timeout(Duration),

    #[error("assistant returned no reply")]
    EmptyResponse,

    #[error("session is busy with another request")]
    Busy,

    #[error("not configured: {0}")]
    NotConfigured(String),
}
