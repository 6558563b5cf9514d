//! `search_subreddit` tool
//!
//! Exposes the keyword search index to the thread finder node.

use async_trait::async_trait;
use council_application::ports::search::SearchPort;
use council_application::ports::tool_executor::ToolExecutorPort;
use council_domain::search::format_candidate_threads;
use council_domain::{ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult, ToolSpec};
use std::sync::Arc;
use tracing::debug;

pub const SEARCH_SUBREDDIT: &str = "search_subreddit";

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 20;

pub fn search_subreddit_definition() -> ToolDefinition {
    ToolDefinition::new(
        SEARCH_SUBREDDIT,
        "Search the local PMDD subreddit export for threads matching keywords",
    )
    .with_parameter(ToolParameter::new("query", "Keywords to search for", true).with_type("string"))
    .with_parameter(
        ToolParameter::new(
            "limit",
            "Maximum number of threads to return (default: 5, max: 20)",
            false,
        )
        .with_type("number"),
    )
}

/// Tool executor backed by a [`SearchPort`]
pub struct SubredditSearchTool {
    index: Arc<dyn SearchPort>,
    default_limit: usize,
    spec: ToolSpec,
}

impl SubredditSearchTool {
    pub fn new(index: Arc<dyn SearchPort>) -> Self {
        Self {
            index,
            default_limit: DEFAULT_LIMIT,
            spec: ToolSpec::new().register(search_subreddit_definition()),
        }
    }

    /// Limit used when the model passes none
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    fn limit(&self, call: &ToolCall) -> usize {
        call.get_i64("limit")
            .map(|n| n.clamp(1, MAX_LIMIT as i64) as usize)
            .unwrap_or(self.default_limit)
    }
}

#[async_trait]
impl ToolExecutorPort for SubredditSearchTool {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        if call.tool_name != SEARCH_SUBREDDIT {
            return ToolResult::failure(&call.tool_name, ToolError::not_found(&call.tool_name));
        }

        let query = match call.require_string("query") {
            Ok(q) => q,
            Err(e) => {
                return ToolResult::failure(SEARCH_SUBREDDIT, ToolError::invalid_argument(e));
            }
        };
        let limit = self.limit(call);
        let hits = self.index.search(query, limit);
        debug!("search_subreddit '{}' (limit {}): {} hits", query, limit, hits.len());

        ToolResult::success(SEARCH_SUBREDDIT, format_candidate_threads(&hits))
    }
}
