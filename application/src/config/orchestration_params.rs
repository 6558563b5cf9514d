//! Orchestration parameters: use case loop control.
//!
//! [`OrchestrationParams`] groups the static parameters that control
//! [`RunOrchestrationUseCase`](crate::use_cases::run_orchestration::RunOrchestrationUseCase).
//! These are application-layer concerns, not domain policy.

use council_domain::HISTORY_WINDOW;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationParams {
    /// Number of most recent turns rendered into every node prompt.
    pub history_window: usize,
    /// Maximum supporting nodes running at once.
    pub max_concurrency: usize,
    /// Maximum tool use turns in a single node invocation.
    pub max_tool_turns: usize,
    /// Default result count for the subreddit search tool.
    pub search_limit: usize,
}

impl Default for OrchestrationParams {
    fn default() -> Self {
        Self {
            history_window: HISTORY_WINDOW,
            max_concurrency: 3,
            max_tool_turns: 3,
            search_limit: 5,
        }
    }
}

impl OrchestrationParams {
    // ==================== Builder Methods ====================

    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    /// Zero is raised to one so the fan-out can always make progress.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }
}
