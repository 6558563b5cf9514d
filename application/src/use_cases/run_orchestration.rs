//! Run Orchestration use case
//!
//! Orchestrates one request: leader parse, leader reply, supporting fan-out,
//! aggregation and the safety audit.

use super::audit::SafetyAuditor;
use super::invoke_node::NodeInvoker;
use super::leader::LeaderProtocol;
use super::supporting::{SupportingContext, SupportingNodeSet};
use crate::config::OrchestrationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::OrchestrationProgress;
use crate::ports::tool_executor::ToolExecutorPort;
use council_domain::core::string::truncate;
use council_domain::{
    ConversationTurn, DomainError, Model, NodeId, OrchestrationResult, Phase, aggregate,
    resolve_search_query, select_supporting_nodes, window,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end an orchestration request
#[derive(Error, Debug)]
pub enum RunOrchestrationError {
    /// Raised before any model call
    #[error("Configuration error: {0}")]
    Configuration(#[from] DomainError),

    /// Leader or audit invocation failed
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Input for the RunOrchestration use case
#[derive(Debug, Clone)]
pub struct RunOrchestrationInput {
    pub message: String,
    pub model: Model,
    /// Full history; only the most recent window is used
    pub history: Vec<ConversationTurn>,
    /// Node identity leading this request
    pub active_node: String,
    /// Supporting nodes the caller allows; empty means all
    pub enabled_nodes: Vec<String>,
    /// Explicit query for the thread finder
    pub search_query: Option<String>,
}

impl RunOrchestrationInput {
    pub fn new(message: impl Into<String>, model: Model) -> Self {
        Self {
            message: message.into(),
            model,
            history: Vec::new(),
            active_node: NodeId::Yapper.to_string(),
            enabled_nodes: Vec::new(),
            search_query: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_active_node(mut self, node: impl Into<String>) -> Self {
        self.active_node = node.into();
        self
    }

    pub fn with_enabled_nodes<S: Into<String>>(mut self, nodes: impl IntoIterator<Item = S>) -> Self {
        self.enabled_nodes = nodes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }
}

/// Use case for running one orchestration request.
///
/// Holds no per-request state; one instance may serve concurrent requests.
pub struct RunOrchestrationUseCase {
    gateway: Arc<dyn LlmGateway>,
    search_tool: Option<Arc<dyn ToolExecutorPort>>,
    params: OrchestrationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for RunOrchestrationUseCase {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            search_tool: self.search_tool.clone(),
            params: self.params.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl RunOrchestrationUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            search_tool: None,
            params: OrchestrationParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Tool handed to the thread finder
    pub fn with_search_tool(mut self, tool: Arc<dyn ToolExecutorPort>) -> Self {
        self.search_tool = Some(tool);
        self
    }

    pub fn with_params(mut self, params: OrchestrationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn params(&self) -> &OrchestrationParams {
        &self.params
    }

    /// Execute the use case with progress callbacks
    pub async fn execute(
        &self,
        input: RunOrchestrationInput,
        progress: &dyn OrchestrationProgress,
    ) -> Result<OrchestrationResult, RunOrchestrationError> {
        let (active, enabled) = validate_nodes(&input.active_node, &input.enabled_nodes)?;

        info!(
            "Starting orchestration (active: {}, model: {}): {}",
            active,
            input.model,
            truncate(&input.message, 80)
        );

        let history = window(&input.history, self.params.history_window);
        let invoker = NodeInvoker::new(Arc::clone(&self.gateway))
            .with_max_tool_turns(self.params.max_tool_turns);
        let leader = LeaderProtocol::new(invoker.clone());

        // Phase 1: Leader parse
        progress.on_phase_start(&Phase::LeaderParse, 1);
        let leader_output = leader
            .parse(active, &input.model, &input.message, history)
            .await?;
        progress.on_node_complete(&Phase::LeaderParse, active, true);
        progress.on_phase_complete(&Phase::LeaderParse);
        self.conversation_logger.log(ConversationEvent::new(
            "leader_output",
            serde_json::json!({
                "active_node": active,
                "output": &leader_output,
            }),
        ));

        // Phase 2: Leader reply
        progress.on_phase_start(&Phase::LeaderReply, 1);
        let leader_response = leader
            .reply(active, &input.model, &input.message, history, &leader_output)
            .await?;
        progress.on_node_complete(&Phase::LeaderReply, active, true);
        progress.on_phase_complete(&Phase::LeaderReply);

        // Phase 3: Supporting nodes
        let selected = select_supporting_nodes(active, &enabled, &leader_output, &input.message);
        debug!("Selected supporting nodes: {:?}", selected);
        let search_query =
            resolve_search_query(input.search_query.as_deref(), &leader_output, &input.message);

        let mut supporting = SupportingNodeSet::new(invoker.clone())
            .with_max_concurrency(self.params.max_concurrency);
        if let Some(tool) = &self.search_tool {
            supporting = supporting.with_search_tool(Arc::clone(tool));
        }
        let context = SupportingContext {
            model: input.model.clone(),
            leader_output: leader_output.clone(),
            history: history.to_vec(),
            task: input.message.clone(),
            search_query,
        };
        let supporting_outputs = supporting.run(&selected, context, progress).await;
        self.conversation_logger.log(ConversationEvent::new(
            "supporting_outputs",
            serde_json::json!({
                "selected": &selected,
                "outputs": &supporting_outputs,
            }),
        ));

        // Phase 4: Aggregate and audit
        let aggregated_output = aggregate(&leader_response, &leader_output, &supporting_outputs);

        progress.on_phase_start(&Phase::Audit, 1);
        let audit_output = SafetyAuditor::new(invoker)
            .audit(&input.model, &aggregated_output)
            .await?;
        progress.on_node_complete(&Phase::Audit, NodeId::Auditor, true);
        progress.on_phase_complete(&Phase::Audit);
        self.conversation_logger.log(ConversationEvent::new(
            "audit_output",
            serde_json::to_value(&audit_output).unwrap_or_default(),
        ));

        let thread_summaries = supporting_outputs
            .get(&NodeId::Redditor)
            .and_then(|o| o.as_thread_finder())
            .map(|t| t.relevant_threads.clone())
            .unwrap_or_default();

        info!(
            "Orchestration complete: {} supporting outputs, {} flags",
            supporting_outputs.len(),
            audit_output.flagged_segments.len()
        );

        Ok(OrchestrationResult {
            response: audit_output.safe_output.clone(),
            leader_response,
            leader_output,
            supporting_outputs,
            aggregated_output,
            audit_output,
            selected_supporting_nodes: selected,
            thread_summaries,
        })
    }
}

/// Resolve node names before any model call.
///
/// Unknown names are errors. Known identities that cannot support (yapper,
/// auditor) are dropped from the enabled list.
fn validate_nodes(
    active: &str,
    enabled: &[String],
) -> Result<(NodeId, Vec<NodeId>), DomainError> {
    let active: NodeId = active.parse()?;
    let mut nodes = Vec::with_capacity(enabled.len());
    for name in enabled {
        let node: NodeId = name.parse()?;
        if node.is_supporting() {
            nodes.push(node);
        } else {
            debug!("Ignoring non-supporting node in enabled list: {}", node);
        }
    }
    Ok((active, nodes))
}
