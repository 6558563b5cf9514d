//! OpenAI-compatible chat session
//!
//! The Chat Completions API is stateless, so the session keeps the full
//! message history and resends it on every call.

use super::types::{self, ChatMessage, ChatRequest, ChatResponse, ChatTool};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmSession, ToolResultMessage};
use council_domain::{LlmResponse, Model, ToolDefinition};
use tokio::sync::Mutex;
use tracing::debug;

/// Sampling temperature for every node invocation
pub const TEMPERATURE: f32 = 0.2;

pub struct OpenAiSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: Model,
    messages: Mutex<Vec<ChatMessage>>,
    /// Set by the first `send_with_tools` call and kept for follow-ups
    tools: Mutex<Option<Vec<ChatTool>>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        endpoint: String,
        api_key: String,
        model: Model,
        system_prompt: &str,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }
        Self {
            client,
            endpoint,
            api_key,
            model,
            messages: Mutex::new(messages),
            tools: Mutex::new(None),
        }
    }

    /// Append `new_messages`, call the API, and record the assistant reply.
    async fn complete(&self, new_messages: Vec<ChatMessage>) -> Result<LlmResponse, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.extend(new_messages);
        let tools = self.tools.lock().await;

        let request = ChatRequest {
            model: self.model.as_str(),
            messages: &messages,
            temperature: TEMPERATURE,
            tools: tools.as_deref().filter(|t| !t.is_empty()),
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            "Calling chat completions"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| types::convert_transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(types::convert_status_error(status, &body));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Invalid response body: {}", e)))?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::RequestFailed("Response had no choices".to_string()))?;

        let converted = types::convert_choice(&choice, body.model.as_deref());
        messages.push(choice.message);
        Ok(converted)
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response = self.complete(vec![ChatMessage::user(content)]).await?;
        Ok(response.text_content())
    }

    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[ToolDefinition],
    ) -> Result<LlmResponse, GatewayError> {
        if !tools.is_empty() {
            *self.tools.lock().await =
                Some(tools.iter().map(types::convert_tool_definition).collect());
        }
        self.complete(vec![ChatMessage::user(content)]).await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        let messages = results.iter().map(types::convert_tool_result).collect();
        self.complete(messages).await
    }
}
