//! OpenAI Assistants API (v2) backend.
//!
//! Implements [`crate::AssistantBackend`] over the thread/message/run HTTP
//! contract: create thread, append message, create run, fetch run status,
//! list messages.

mod api;
mod client;
mod config;

pub use client::OpenAiBackend;
pub use config::OpenAiConfig;
