//! Chat Completions wire types and conversions
//!
//! Translates between the domain's [`LlmResponse`] / [`ToolDefinition`]
//! and the OpenAI-compatible JSON schema.

use council_application::ports::llm_gateway::{GatewayError, ToolResultMessage};
use council_domain::{ContentBlock, LlmResponse, StopReason, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: &str) -> Self {
        Self::text("user", content)
    }

    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: WireFunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    /// JSON-encoded argument object
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: ChatFunction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatFunction {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [ChatTool]>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

fn function_kind() -> String {
    "function".to_string()
}

pub fn convert_tool_definition(definition: &ToolDefinition) -> ChatTool {
    ChatTool {
        kind: function_kind(),
        function: ChatFunction {
            name: definition.name.clone(),
            description: definition.description.clone(),
            parameters: definition.parameters_schema(),
        },
    }
}

/// Convert the assistant message of a choice into an [`LlmResponse`].
///
/// Tool arguments that are not a JSON object become an empty argument map,
/// which the tool then rejects as a missing argument.
pub fn convert_choice(choice: &ChatChoice, model: Option<&str>) -> LlmResponse {
    let mut content = Vec::new();

    if let Some(text) = &choice.message.content
        && !text.is_empty()
    {
        content.push(ContentBlock::Text(text.clone()));
    }

    for call in choice.message.tool_calls.iter().flatten() {
        let input: HashMap<String, serde_json::Value> =
            match serde_json::from_str(&call.function.arguments) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Tool call {} had unparseable arguments: {}",
                        call.function.name, e
                    );
                    HashMap::new()
                }
            };
        content.push(ContentBlock::ToolUse {
            id: call.id.clone(),
            name: call.function.name.clone(),
            input,
        });
    }

    LlmResponse {
        content,
        stop_reason: choice
            .finish_reason
            .as_deref()
            .map(StopReason::from_finish_reason),
        model: model.map(str::to_string),
    }
}

pub fn convert_tool_result(result: &ToolResultMessage) -> ChatMessage {
    ChatMessage {
        role: "tool".to_string(),
        content: Some(result.output.clone()),
        tool_calls: None,
        tool_call_id: Some(result.tool_use_id.clone()),
    }
}

pub fn convert_status_error(status: reqwest::StatusCode, body: &str) -> GatewayError {
    match status.as_u16() {
        404 => GatewayError::ModelNotAvailable(body.to_string()),
        408 | 504 => GatewayError::Timeout,
        code => GatewayError::RequestFailed(format!("HTTP {}: {}", code, body)),
    }
}

pub fn convert_transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else if err.is_connect() {
        GatewayError::ConnectionError(err.to_string())
    } else {
        GatewayError::RequestFailed(err.to_string())
    }
}
