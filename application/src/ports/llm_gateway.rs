//! LLM Gateway port
//!
//! Defines the interface for communicating with text-generation providers.

use async_trait::async_trait;
use council_domain::{LlmResponse, Model, ToolDefinition};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// A tool execution result sent back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResultMessage {
    /// The provider-assigned id of the tool call this answers
    pub tool_use_id: String,
    pub tool_name: String,
    pub output: String,
    pub is_error: bool,
}

/// Gateway for LLM communication
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Create a new session with a system prompt
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;

    /// Create a new session without a system prompt
    async fn create_session(&self, model: &Model) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.create_session_with_system_prompt(model, "").await
    }

    /// Get available models
    async fn available_models(&self) -> Result<Vec<Model>, GatewayError> {
        Ok(Model::known_models())
    }
}

/// An active LLM session. Sessions keep their own message history.
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a text response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message with tools the model may call.
    ///
    /// Default implementation ignores the tools and wraps `send()`, for
    /// providers without native tool use.
    async fn send_with_tools(
        &self,
        content: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LlmResponse, GatewayError> {
        self.send(content).await.map(LlmResponse::from_text)
    }

    /// Send tool execution results and get the model's next response.
    async fn send_tool_results(
        &self,
        _results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        Err(GatewayError::Other(
            "tool results are not supported by this session".to_string(),
        ))
    }
}
