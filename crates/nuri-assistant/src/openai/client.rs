//! OpenAI backend struct, request plumbing, and response parsing.

use crate::{AssistantError, Role, Run, RunStatus, ThreadMessage};

use super::config::OpenAiConfig;

/// Value of the `OpenAI-Beta` header required by the Assistants v2 API.
pub(crate) const OPENAI_BETA: &str = "assistants=v2";

/// HTTP backend for the OpenAI Assistants API.
pub struct OpenAiBackend {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Auth + beta headers carried by every request.
    pub(crate) fn auth_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Authorization",
            format!("Bearer {}", self.config.api_key)
                .parse()
                .expect("invalid API key header"),
        );
        headers.insert("OpenAI-Beta", OPENAI_BETA.parse().expect("invalid beta header"));
        headers
    }

    /// Turn a response into its JSON body, mapping non-success statuses to
    /// `Transport` with a truncated body excerpt.
    pub(crate) async fn read_json(
        &self,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, AssistantError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(AssistantError::Transport {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| AssistantError::Parse(e.to_string()))
    }

    pub(crate) fn parse_run(&self, json: &serde_json::Value) -> Result<Run, AssistantError> {
        let id = json["id"]
            .as_str()
            .ok_or_else(|| AssistantError::Parse("run object missing id".into()))?
            .to_string();
        let status = self.parse_status(json)?;
        Ok(Run { id, status })
    }

    pub(crate) fn parse_status(
        &self,
        json: &serde_json::Value,
    ) -> Result<RunStatus, AssistantError> {
        serde_json::from_value(json["status"].clone())
            .map_err(|e| AssistantError::Parse(format!("run status: {e}")))
    }

    /// Extract messages from a list response, newest first as the service
    /// orders them. Non-text content parts are skipped.
    pub(crate) fn parse_messages(
        &self,
        json: &serde_json::Value,
    ) -> Result<Vec<ThreadMessage>, AssistantError> {
        let data = json["data"]
            .as_array()
            .ok_or_else(|| AssistantError::Parse("message list missing data".into()))?;

        let mut messages = Vec::with_capacity(data.len());
        for item in data {
            let role = match item["role"].as_str() {
                Some("user") => Role::User,
                Some("assistant") => Role::Assistant,
                _ => continue,
            };
            let content = item["content"]
                .as_array()
                .map(|parts| {
                    parts
                        .iter()
                        .filter(|p| p["type"] == "text")
                        .filter_map(|p| p["text"]["value"].as_str().map(String::from))
                        .collect()
                })
                .unwrap_or_default();
            messages.push(ThreadMessage { role, content });
        }
        Ok(messages)
    }
}
