//! ConversationSession struct and lifecycle management.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::poll::PollPolicy;
use crate::{AssistantBackend, OpenAiBackend, OpenAiConfig};

/// Fixed user-safe sentence returned whenever an exchange fails.
pub(crate) const FALLBACK_REPLY: &str = "죄송합니다. 오류가 발생했습니다.";

/// Fixed follow-up prompt asking a cut-off assistant to continue.
pub(crate) const CONTINUATION_PROMPT: &str = "이어서 계속 답변해주세요.";

/// A conversation against one assistant thread.
pub struct ConversationSession {
    /// Transport to the assistant service.
    pub(super) backend: Box<dyn AssistantBackend>,
    /// Retry/timeout budget for each invocation.
    pub(super) policy: PollPolicy,
    /// Thread handle, created lazily on first use and reused until reset.
    pub(super) thread_id: Option<String>,
    /// Continuation rounds allowed per `generate_response` call.
    pub(super) max_continuations: u32,
    /// Pause before sending the continuation prompt.
    pub(super) continuation_delay: Duration,
    /// Follow-up message sent when a reply was cut off.
    pub(super) continuation_prompt: String,
    /// Sentence shown to the user when anything goes wrong.
    pub(super) fallback_reply: String,
    /// Whether an exchange is currently in flight. Shared with the guard the
    /// exchange holds, so the session itself is not borrowed by it.
    pub(super) busy: Arc<AtomicBool>,
}

impl ConversationSession {
    pub fn new(backend: Box<dyn AssistantBackend>) -> Self {
        Self {
            backend,
            policy: PollPolicy::default(),
            thread_id: None,
            max_continuations: 3,
            continuation_delay: Duration::from_secs(3),
            continuation_prompt: CONTINUATION_PROMPT.to_string(),
            fallback_reply: FALLBACK_REPLY.to_string(),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Session over the real OpenAI Assistants backend.
    pub fn open_ai(config: OpenAiConfig) -> Self {
        Self::new(Box::new(OpenAiBackend::new(config)))
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_continuations(mut self, max: u32) -> Self {
        self.max_continuations = max;
        self
    }

    pub fn with_continuation_delay(mut self, delay: Duration) -> Self {
        self.continuation_delay = delay;
        self
    }

    pub fn with_continuation_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.continuation_prompt = prompt.into();
        self
    }

    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }

    /// Identifier of the held thread, if one has been created.
    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Drop the held thread handle. The remote thread is abandoned, not
    /// deleted; the next exchange creates a fresh one.
    pub fn reset_conversation(&mut self) {
        self.thread_id = None;
        debug!("conversation reset");
    }
}
