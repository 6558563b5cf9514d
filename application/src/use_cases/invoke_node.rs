//! Node invoker.
//!
//! One node invocation is one gateway session: the node's instruction as the
//! system prompt, one user message, and (when tools are supplied) the native
//! tool-use loop until the model stops asking for tools.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use council_domain::Model;
use council_domain::core::string::truncate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs single node invocations against the gateway.
///
/// No retry and no timeout at this layer: gateway errors propagate to the
/// caller, which decides whether they are fatal.
#[derive(Clone)]
pub struct NodeInvoker {
    gateway: Arc<dyn LlmGateway>,
    max_tool_turns: usize,
}

impl NodeInvoker {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            max_tool_turns: 3,
        }
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    /// Invoke one node and return its completion text.
    ///
    /// With tools, returns the text of the last response that carried any
    /// (empty if none did).
    pub async fn invoke(
        &self,
        instruction: &str,
        model: &Model,
        user_content: &str,
        tools: Option<&dyn ToolExecutorPort>,
    ) -> Result<String, GatewayError> {
        debug!(
            "Invoking {} (instruction {} bytes, content {} bytes)",
            model,
            instruction.len(),
            user_content.len()
        );

        let session = self
            .gateway
            .create_session_with_system_prompt(model, instruction)
            .await?;

        let Some(executor) = tools.filter(|t| !t.tool_spec().is_empty()) else {
            return session.send(user_content).await;
        };

        let definitions = executor.definitions();
        let mut response = session.send_with_tools(user_content, &definitions).await?;

        let mut last_text = String::new();
        let text = response.text_content();
        if !text.trim().is_empty() {
            last_text = text;
        }

        let mut turn_count = 0;
        loop {
            let tool_calls = response.tool_calls();
            if tool_calls.is_empty() {
                break;
            }

            turn_count += 1;
            if turn_count > self.max_tool_turns {
                warn!(
                    "Tool loop exceeded max_tool_turns ({}); keeping last text",
                    self.max_tool_turns
                );
                break;
            }

            let futures = tool_calls.iter().map(|call| executor.execute(call));
            let results = futures::future::join_all(futures).await;

            let mut messages = Vec::with_capacity(tool_calls.len());
            for (call, result) in tool_calls.iter().zip(results) {
                debug!(
                    "Tool {} -> {}",
                    call.tool_name,
                    truncate(&result.content_for_model(), 80)
                );
                match &call.native_id {
                    Some(id) => messages.push(ToolResultMessage {
                        tool_use_id: id.clone(),
                        tool_name: call.tool_name.clone(),
                        output: result.content_for_model(),
                        is_error: !result.is_success(),
                    }),
                    None => warn!(
                        "Missing native_id for tool call '{}'; skipping result",
                        call.tool_name
                    ),
                }
            }

            debug!(
                "Tool turn {}/{}: sending {} results",
                turn_count,
                self.max_tool_turns,
                messages.len()
            );
            response = session.send_tool_results(&messages).await?;

            let text = response.text_content();
            if !text.trim().is_empty() {
                last_text = text;
            }
        }

        Ok(last_text)
    }
}
