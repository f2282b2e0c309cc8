//! Conversation session management.
//!
//! A [`ConversationSession`] owns at most one thread handle and drives one
//! user utterance at a time through the assistant protocol: ensure thread,
//! append message, run, poll to a terminal state, fetch and normalize the
//! reply.

mod chat;
mod manager;
mod types;

pub use manager::ConversationSession;
