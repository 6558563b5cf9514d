//! Supporting node fan-out.
//!
//! The selected supporting nodes run as a task group bounded by a semaphore.
//! Every task is awaited; [`settle_outcomes`] then maps each failure to an
//! absent output so one node never takes down its siblings.

use super::invoke_node::NodeInvoker;
use crate::ports::llm_gateway::GatewayError;
use crate::ports::progress::OrchestrationProgress;
use crate::ports::tool_executor::ToolExecutorPort;
use council_domain::{
    ConversationTurn, LeaderOutput, Model, NodeId, NodePromptTemplate, Phase, SupportingOutput,
    extract_json_object,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Everything a supporting node sees for one request
#[derive(Debug, Clone)]
pub struct SupportingContext {
    pub model: Model,
    pub leader_output: LeaderOutput,
    pub history: Vec<ConversationTurn>,
    /// The user's message
    pub task: String,
    /// Query for the thread finder
    pub search_query: String,
}

/// Result of one spawned node task
pub type NodeOutcome = Result<(NodeId, Result<SupportingOutput, GatewayError>), JoinError>;

/// Runs supporting nodes concurrently
#[derive(Clone)]
pub struct SupportingNodeSet {
    invoker: NodeInvoker,
    search_tool: Option<Arc<dyn ToolExecutorPort>>,
    max_concurrency: usize,
}

impl SupportingNodeSet {
    pub fn new(invoker: NodeInvoker) -> Self {
        Self {
            invoker,
            search_tool: None,
            max_concurrency: 3,
        }
    }

    /// Tool handed to the thread finder
    pub fn with_search_tool(mut self, tool: Arc<dyn ToolExecutorPort>) -> Self {
        self.search_tool = Some(tool);
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    /// Run `nodes` and return the outputs of those that succeeded.
    pub async fn run(
        &self,
        nodes: &[NodeId],
        context: SupportingContext,
        progress: &dyn OrchestrationProgress,
    ) -> BTreeMap<NodeId, SupportingOutput> {
        if nodes.is_empty() {
            debug!("No supporting nodes selected");
            return BTreeMap::new();
        }

        info!(
            "Dispatching {} supporting nodes (max {} concurrent)",
            nodes.len(),
            self.max_concurrency
        );
        progress.on_phase_start(&Phase::Supporting, nodes.len());

        let context = Arc::new(context);
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut join_set = JoinSet::new();

        for &node in nodes {
            let invoker = self.invoker.clone();
            let context = Arc::clone(&context);
            let semaphore = Arc::clone(&semaphore);
            let tool = if node == NodeId::Redditor {
                self.search_tool.clone()
            } else {
                None
            };

            join_set.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => run_node(&invoker, node, &context, tool.as_deref()).await,
                    Err(e) => Err(GatewayError::Other(format!("worker pool closed: {}", e))),
                };
                (node, result)
            });
        }

        let mut outcomes = Vec::with_capacity(nodes.len());
        while let Some(outcome) = join_set.join_next().await {
            if let Ok((node, result)) = &outcome {
                progress.on_node_complete(&Phase::Supporting, *node, result.is_ok());
            }
            outcomes.push(outcome);
        }

        let outputs = settle_outcomes(outcomes);
        progress.on_phase_complete(&Phase::Supporting);
        info!(
            "Supporting nodes settled: {}/{} produced output",
            outputs.len(),
            nodes.len()
        );
        outputs
    }
}

/// Invoke one supporting node and parse its record.
async fn run_node(
    invoker: &NodeInvoker,
    node: NodeId,
    context: &SupportingContext,
    tool: Option<&dyn ToolExecutorPort>,
) -> Result<SupportingOutput, GatewayError> {
    let instruction = NodePromptTemplate::supporting_system(node)
        .ok_or_else(|| GatewayError::Other(format!("{} is not a supporting node", node)))?;
    let prompt = NodePromptTemplate::supporting_prompt(
        node,
        &context.leader_output,
        &context.history,
        &context.task,
        &context.search_query,
    );

    let raw = invoker
        .invoke(&instruction, &context.model, &prompt, tool)
        .await?;

    let output = match extract_json_object(&raw) {
        Some(obj) => SupportingOutput::from_object(node, &obj),
        None => {
            warn!("{} output was not JSON; using fallback record", node);
            SupportingOutput::fallback(node, &raw)
        }
    };
    output.ok_or_else(|| GatewayError::Other(format!("{} is not a supporting node", node)))
}

/// Join step: keep successful outputs and drop failures.
///
/// A gateway error or a panicked task makes that node absent from the
/// result; the failure is logged and nothing is propagated.
pub fn settle_outcomes(
    outcomes: impl IntoIterator<Item = NodeOutcome>,
) -> BTreeMap<NodeId, SupportingOutput> {
    let mut outputs = BTreeMap::new();
    for outcome in outcomes {
        match outcome {
            Ok((node, Ok(output))) => {
                debug!("{} completed", node);
                outputs.insert(node, output);
            }
            Ok((node, Err(e))) => {
                warn!("{} failed, omitting its output: {}", node, e);
            }
            Err(e) => {
                warn!("Supporting task join error: {}", e);
            }
        }
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::test_support::{
        DEFINER, DRAFTER, RecordingSearchTool, Scripted, ScriptedGateway, THREAD_FINDER,
        sent_prompts, text, tool_use,
    };
    use council_domain::DefinerOutput;
    use std::sync::Mutex;
    use std::time::Duration;

    fn context() -> SupportingContext {
        SupportingContext {
            model: Model::default(),
            leader_output: LeaderOutput::default(),
            history: Vec::new(),
            task: "I've had cramping".to_string(),
            search_query: "cramping".to_string(),
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(NodeId, bool)>>,
    }

    impl OrchestrationProgress for RecordingProgress {
        fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
        fn on_node_complete(&self, _phase: &Phase, node: NodeId, success: bool) {
            self.events.lock().unwrap().push((node, success));
        }
        fn on_phase_complete(&self, _phase: &Phase) {}
    }

    #[tokio::test]
    async fn test_failing_node_does_not_affect_siblings() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .route(DEFINER, vec![Scripted::Error("provider down".to_string())])
                .route(THREAD_FINDER, vec![text(r#"{"relevant_threads": []}"#)])
                .route(DRAFTER, vec![text(r#"{"draft_message": "Hi all"}"#)]),
        );
        let set = SupportingNodeSet::new(NodeInvoker::new(gateway));
        let progress = RecordingProgress::default();

        let outputs = set
            .run(&NodeId::SUPPORTING, context(), &progress)
            .await;

        assert!(!outputs.contains_key(&NodeId::Definer));
        assert!(outputs.contains_key(&NodeId::Redditor));
        assert_eq!(
            outputs[&NodeId::Engager].as_drafter().unwrap().draft_message,
            "Hi all"
        );

        let mut events = progress.events.lock().unwrap().clone();
        events.sort();
        assert_eq!(
            events,
            vec![
                (NodeId::Definer, false),
                (NodeId::Redditor, true),
                (NodeId::Engager, true)
            ]
        );
    }

    #[tokio::test]
    async fn test_only_thread_finder_gets_the_tool() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .route(DEFINER, vec![tool_use("call_x", "should not run"), text("{}")])
                .route(
                    THREAD_FINDER,
                    vec![tool_use("call_1", "cramping"), text(r#"{"relevant_threads": []}"#)],
                ),
        );
        let tool = Arc::new(RecordingSearchTool::new());
        let set = SupportingNodeSet::new(NodeInvoker::new(gateway))
            .with_search_tool(tool.clone());

        let outputs = set
            .run(&[NodeId::Definer, NodeId::Redditor], context(), &NoProgress)
            .await;

        assert_eq!(tool.call_count(), 1);
        assert_eq!(tool.calls.lock().unwrap()[0].get_string("query"), Some("cramping"));
        // Without tools the definer gets plain send(): the tool-use script yields no text
        assert_eq!(
            outputs[&NodeId::Definer],
            SupportingOutput::Definer(DefinerOutput::default())
        );
    }

    #[tokio::test]
    async fn test_search_query_reaches_thread_finder_prompt() {
        let gateway = Arc::new(
            ScriptedGateway::new().route(THREAD_FINDER, vec![text(r#"{"relevant_threads": []}"#)]),
        );
        let set = SupportingNodeSet::new(NodeInvoker::new(gateway.clone()));

        set.run(&[NodeId::Redditor], context(), &NoProgress).await;
        assert!(sent_prompts(&gateway)[0].contains("Search query:\ncramping"));
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_delay(Duration::from_millis(30))
                .route(DEFINER, vec![text("{}")])
                .route(THREAD_FINDER, vec![text("{}")])
                .route(DRAFTER, vec![text("{}")]),
        );
        let set = SupportingNodeSet::new(NodeInvoker::new(gateway.clone())).with_max_concurrency(1);

        let outputs = set.run(&NodeId::SUPPORTING, context(), &NoProgress).await;
        assert_eq!(outputs.len(), 3);
        assert_eq!(gateway.gauge.peak(), 1);
    }

    #[tokio::test]
    async fn test_settle_outcomes_absorbs_panics() {
        let mut join_set = JoinSet::new();
        join_set.spawn(async { (NodeId::Definer, Ok(SupportingOutput::Definer(DefinerOutput::default()))) });
        join_set.spawn(async {
            if true {
                panic!("node crashed");
            }
            (NodeId::Engager, Err(GatewayError::Timeout))
        });
        join_set.spawn(async { (NodeId::Redditor, Err(GatewayError::Timeout)) });

        let mut outcomes = Vec::new();
        while let Some(outcome) = join_set.join_next().await {
            outcomes.push(outcome);
        }

        let outputs = settle_outcomes(outcomes);
        assert_eq!(outputs.keys().copied().collect::<Vec<_>>(), vec![NodeId::Definer]);
    }

    #[tokio::test]
    async fn test_empty_selection() {
        let gateway = Arc::new(ScriptedGateway::new());
        let set = SupportingNodeSet::new(NodeInvoker::new(gateway.clone()));
        assert!(set.run(&[], context(), &NoProgress).await.is_empty());
        assert_eq!(gateway.system_prompts.lock().unwrap().len(), 0);
    }
}
