//! OpenAI backend configuration.

use std::fmt;

use crate::AssistantError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Assistants API configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub assistant_id: String,
    pub base_url: String,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("assistant_id", &self.assistant_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            assistant_id: assistant_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create config from `OPENAI_API_KEY` and `OPENAI_ASSISTANT_ID`.
    pub fn from_env() -> Result<Self, AssistantError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AssistantError::NotConfigured("OPENAI_API_KEY is not set".into())
        })?;
        let assistant_id = std::env::var("OPENAI_ASSISTANT_ID").map_err(|_| {
            AssistantError::NotConfigured("OPENAI_ASSISTANT_ID is not set".into())
        })?;
        Ok(Self::new(api_key, assistant_id))
    }

    /// Override the API base URL (testing against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let config = OpenAiConfig::new("sk-secret", "asst_123");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("asst_123"));
    }

    #[test]
    fn base_url_override() {
        let config =
            OpenAiConfig::new("sk-secret", "asst_123").with_base_url("http://localhost:8080/v1");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }
}
