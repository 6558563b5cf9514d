//! Tool Executor port
//!
//! Defines the interface for executing tools requested by a node.

use async_trait::async_trait;
use council_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Definitions handed to the model, ordered by name
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.tool_spec().all().cloned().collect()
    }

    /// Execute a tool call. Failures are reported in the result, never raised.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
