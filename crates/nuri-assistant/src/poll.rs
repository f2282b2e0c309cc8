//! Run polling policy and the pure status transition function.
//!
//! The driver loop in [`crate::session`] owns the clock and the transport;
//! everything decision-shaped lives in [`next_step`] so the retry/timeout
//! behavior is testable without either.

use std::time::Duration;

use crate::{AssistantError, RunStatus};

/// Timing and retry budget for one assistant invocation.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Wall-clock budget for the whole run, replacements included.
    pub run_timeout: Duration,
    /// Replacement runs allowed after a `failed`/`cancelled` terminal.
    pub max_run_retries: u32,
    /// Delay before re-fetching while the run is `in_progress`.
    pub busy_interval: Duration,
    /// Delay before re-fetching in any other non-terminal state.
    pub idle_interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            run_timeout: Duration::from_secs(60),
            max_run_retries: 3,
            busy_interval: Duration::from_secs(1),
            idle_interval: Duration::from_secs(2),
        }
    }
}

impl PollPolicy {
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn with_max_run_retries(mut self, retries: u32) -> Self {
        self.max_run_retries = retries;
        self
    }
}

/// What the driver loop should do next.
#[derive(Debug)]
pub enum PollStep {
    /// The run completed; fetch the reply.
    Done,
    /// Start a brand-new run in place of the failed one.
    Replace,
    /// Sleep, then re-fetch the run status.
    Wait(Duration),
    /// Give up with the given error.
    Fail(AssistantError),
}

/// Decide the next poll action from the current run status, the elapsed
/// wall-clock time since the first run was created, and how many replacement
/// runs have already been started.
///
/// The timeout is checked first and wins over every status, `completed`
/// included. `requires_action` is never fulfilled here; such runs keep
/// waiting until the timeout fires.
pub fn next_step(
    status: RunStatus,
    elapsed: Duration,
    replacements: u32,
    policy: &PollPolicy,
) -> PollStep {
    if elapsed >= policy.run_timeout {
        return PollStep::Fail(AssistantError::Timeout(policy.run_timeout));
    }

    match status {
        RunStatus::Completed => PollStep::Done,
        RunStatus::Failed | RunStatus::Cancelled => {
            if replacements < policy.max_run_retries {
                PollStep::Replace
            } else {
                PollStep::Fail(AssistantError::RunFailed {
                    status,
                    replacements,
                })
            }
        }
        RunStatus::InProgress => PollStep::Wait(policy.busy_interval),
        RunStatus::Queued | RunStatus::RequiresAction => PollStep::Wait(policy.idle_interval),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PollPolicy {
        PollPolicy::default()
    }

    #[test]
    fn completed_is_done() {
        let step = next_step(RunStatus::Completed, Duration::ZERO, 0, &policy());
        assert!(matches!(step, PollStep::Done));
    }

    #[test]
    fn timeout_wins_over_any_status() {
        let elapsed = Duration::from_secs(60);
        for status in [
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::RequiresAction,
            RunStatus::Completed,
            RunStatus::Failed,
        ] {
            let step = next_step(status, elapsed, 0, &policy());
            assert!(
                matches!(step, PollStep::Fail(AssistantError::Timeout(_))),
                "expected timeout for {status}"
            );
        }
    }

    #[test]
    fn failed_run_is_replaced_within_budget() {
        for replacements in 0..3 {
            let step = next_step(RunStatus::Failed, Duration::ZERO, replacements, &policy());
            assert!(matches!(step, PollStep::Replace));
        }
    }

    #[test]
    fn failed_run_exhausts_retry_budget() {
        let step = next_step(RunStatus::Cancelled, Duration::ZERO, 3, &policy());
        match step {
            PollStep::Fail(AssistantError::RunFailed {
                status,
                replacements,
            }) => {
                assert_eq!(status, RunStatus::Cancelled);
                assert_eq!(replacements, 3);
            }
            other => panic!("expected RunFailed, got {other:?}"),
        }
    }

    #[test]
    fn in_progress_polls_faster_than_queued() {
        let busy = next_step(RunStatus::InProgress, Duration::ZERO, 0, &policy());
        let idle = next_step(RunStatus::Queued, Duration::ZERO, 0, &policy());
        match (busy, idle) {
            (PollStep::Wait(busy), PollStep::Wait(idle)) => assert!(busy < idle),
            other => panic!("expected waits, got {other:?}"),
        }
    }

    #[test]
    fn requires_action_keeps_waiting() {
        let step = next_step(RunStatus::RequiresAction, Duration::ZERO, 0, &policy());
        assert!(matches!(step, PollStep::Wait(d) if d == policy().idle_interval));
    }
}
