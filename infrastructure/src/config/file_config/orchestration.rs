//! Orchestration settings from TOML (`[orchestration]` section)

use council_application::OrchestrationParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// Most recent turns included in prompts
    pub history_window: usize,
    /// Supporting nodes in flight at once
    pub max_concurrency: usize,
    /// Tool-use round trips per node invocation
    pub max_tool_turns: usize,
    /// Threads returned by the search tool when the model gives no limit
    pub search_limit: usize,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        let params = OrchestrationParams::default();
        Self {
            history_window: params.history_window,
            max_concurrency: params.max_concurrency,
            max_tool_turns: params.max_tool_turns,
            search_limit: params.search_limit,
        }
    }
}

impl FileOrchestrationConfig {
    pub fn to_params(&self) -> OrchestrationParams {
        OrchestrationParams::default()
            .with_history_window(self.history_window)
            .with_max_concurrency(self.max_concurrency)
            .with_max_tool_turns(self.max_tool_turns)
            .with_search_limit(self.search_limit)
    }
}
