//! AssistantBackend trait implementation for OpenAiBackend.

use async_trait::async_trait;
use tracing::debug;

use crate::{AssistantBackend, AssistantError, Role, Run, RunStatus, ThreadMessage};

use super::client::OpenAiBackend;

#[async_trait]
impl AssistantBackend for OpenAiBackend {
    async fn create_thread(&self) -> Result<String, AssistantError> {
        debug!("creating thread");

        let response = self
            .http
            .post(self.url("/threads"))
            .headers(self.auth_headers())
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let json = self.read_json(response).await?;
        json["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AssistantError::Parse("thread object missing id".into()))
    }

    async fn append_message(
        &self,
        thread_id: &str,
        role: Role,
        content: &str,
    ) -> Result<(), AssistantError> {
        debug!(thread = thread_id, "appending message");

        let response = self
            .http
            .post(self.url(&format!("/threads/{thread_id}/messages")))
            .headers(self.auth_headers())
            .json(&serde_json::json!({
                "role": role,
                "content": content,
            }))
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        self.read_json(response).await?;
        Ok(())
    }

    async fn create_run(&self, thread_id: &str) -> Result<Run, AssistantError> {
        debug!(thread = thread_id, assistant = %self.config.assistant_id, "creating run");

        let response = self
            .http
            .post(self.url(&format!("/threads/{thread_id}/runs")))
            .headers(self.auth_headers())
            .json(&serde_json::json!({
                "assistant_id": self.config.assistant_id,
            }))
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let json = self.read_json(response).await?;
        self.parse_run(&json)
    }

    async fn run_status(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunStatus, AssistantError> {
        debug!(thread = thread_id, run = run_id, "fetching run status");

        let response = self
            .http
            .get(self.url(&format!("/threads/{thread_id}/runs/{run_id}")))
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let json = self.read_json(response).await?;
        self.parse_status(&json)
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, AssistantError> {
        debug!(thread = thread_id, "listing messages");

        let response = self
            .http
            .get(self.url(&format!("/threads/{thread_id}/messages")))
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let json = self.read_json(response).await?;
        self.parse_messages(&json)
    }
}
