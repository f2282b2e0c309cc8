//! Async exchange driver for ConversationSession.

use tokio::time::{sleep, Instant};
use tracing::{debug, error, warn};

use crate::normalize::{needs_continuation, normalize_reply};
use crate::poll::{next_step, PollStep};
use crate::{AssistantError, Role};

use super::manager::ConversationSession;
use super::types::BusyGuard;

impl ConversationSession {
    /// Drive one user utterance through the assistant and return the reply.
    ///
    /// Never fails: every error is logged and collapsed into the fixed
    /// fallback sentence, so the caller can always display the result.
    pub async fn generate_response(&mut self, user_text: &str) -> String {
        let _guard = match BusyGuard::acquire(self.busy.clone()) {
            Ok(guard) => guard,
            Err(err) => {
                warn!(error = %err, "rejecting overlapping generate_response call");
                return self.fallback_reply.clone();
            }
        };

        match self.exchange(user_text).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "assistant exchange failed");
                self.fallback_reply.clone()
            }
        }
    }

    /// Run the exchange, following cut-off replies with the continuation
    /// prompt up to `max_continuations` times.
    async fn exchange(&mut self, user_text: &str) -> Result<String, AssistantError> {
        let mut prompt = user_text.to_string();
        let mut continuations = 0;

        loop {
            let raw = self.run_once(&prompt).await?;
            let reply = normalize_reply(&raw);

            if needs_continuation(&reply) && continuations < self.max_continuations {
                continuations += 1;
                debug!(continuations, "reply cut off, requesting continuation");
                sleep(self.continuation_delay).await;
                prompt = self.continuation_prompt.clone();
                continue;
            }
            return Ok(reply);
        }
    }

    /// One full append-message / run / poll / fetch round trip.
    async fn run_once(&mut self, prompt: &str) -> Result<String, AssistantError> {
        let thread_id = match self.thread_id.clone() {
            Some(id) => id,
            None => {
                let id = self.backend.create_thread().await?;
                debug!(thread = %id, "created thread");
                self.thread_id = Some(id.clone());
                id
            }
        };

        self.backend
            .append_message(&thread_id, Role::User, prompt)
            .await?;
        self.poll_run(&thread_id).await?;

        let messages = self.backend.list_messages(&thread_id).await?;
        let newest = messages
            .into_iter()
            .next()
            .ok_or(AssistantError::EmptyResponse)?;
        if newest.role != Role::Assistant {
            return Err(AssistantError::EmptyResponse);
        }
        newest
            .content
            .into_iter()
            .next()
            .ok_or(AssistantError::EmptyResponse)
    }

    /// Poll a run to completion, replacing terminally failed runs within the
    /// policy's retry budget and enforcing its wall-clock timeout.
    async fn poll_run(&mut self, thread_id: &str) -> Result<(), AssistantError> {
        let started = Instant::now();
        let mut replacements = 0u32;
        let mut run = self.backend.create_run(thread_id).await?;

        loop {
            match next_step(run.status, started.elapsed(), replacements, &self.policy) {
                PollStep::Done => return Ok(()),
                PollStep::Replace => {
                    replacements += 1;
                    warn!(status = %run.status, replacements, "run failed, starting replacement");
                    run = self.backend.create_run(thread_id).await?;
                }
                PollStep::Wait(delay) => {
                    sleep(delay).await;
                    run.status = self.backend.run_status(thread_id, &run.id).await?;
                }
                PollStep::Fail(err) => return Err(err),
            }
        }
    }
}
