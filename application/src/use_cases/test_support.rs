//! Scripted gateway and tool mocks shared by the use case tests.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage};
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use council_domain::{
    ContentBlock, LlmResponse, Model, StopReason, ToolCall, ToolDefinition, ToolParameter,
    ToolResult, ToolSpec,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Markers that identify each invocation by its system prompt
pub(crate) const LEADER_PARSE: &str = "extract structured facts";
pub(crate) const LEADER_REPLY: &str = "Write the conversational reply";
pub(crate) const DEFINER: &str = "Explain the medical terms";
pub(crate) const THREAD_FINDER: &str = "Find community threads";
pub(crate) const DRAFTER: &str = "Draft a respectful message";
pub(crate) const AUDITOR: &str = "Review the response below";

#[derive(Debug, Clone)]
pub(crate) enum Scripted {
    Text(String),
    Response(LlmResponse),
    Error(String),
}

pub(crate) fn text(s: &str) -> Scripted {
    Scripted::Text(s.to_string())
}

pub(crate) fn tool_use(id: &str, query: &str) -> Scripted {
    Scripted::Response(LlmResponse {
        content: vec![ContentBlock::ToolUse {
            id: id.to_string(),
            name: "search_subreddit".to_string(),
            input: [("query".to_string(), serde_json::json!(query))]
                .into_iter()
                .collect(),
        }],
        stop_reason: Some(StopReason::ToolUse),
        model: None,
    })
}

/// Tracks how many sessions are mid-request at once
#[derive(Default)]
pub(crate) struct ConcurrencyGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

struct ScriptedSession {
    model: Model,
    responses: Mutex<VecDeque<Scripted>>,
    sent: Arc<Mutex<Vec<String>>>,
    tool_results: Arc<Mutex<Vec<ToolResultMessage>>>,
    delay: Option<Duration>,
    gauge: Arc<ConcurrencyGauge>,
}

impl ScriptedSession {
    async fn next_response(&self) -> Scripted {
        self.gauge.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.gauge.exit();
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Error("No more responses".to_string()))
    }
}

#[async_trait]
impl LlmSession for ScriptedSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.sent.lock().unwrap().push(content.to_string());
        match self.next_response().await {
            Scripted::Text(t) => Ok(t),
            Scripted::Response(r) => Ok(r.text_content()),
            Scripted::Error(e) => Err(GatewayError::RequestFailed(e)),
        }
    }

    async fn send_with_tools(
        &self,
        content: &str,
        _tools: &[ToolDefinition],
    ) -> Result<LlmResponse, GatewayError> {
        self.sent.lock().unwrap().push(content.to_string());
        match self.next_response().await {
            Scripted::Text(t) => Ok(LlmResponse::from_text(t)),
            Scripted::Response(r) => Ok(r),
            Scripted::Error(e) => Err(GatewayError::RequestFailed(e)),
        }
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<LlmResponse, GatewayError> {
        self.tool_results.lock().unwrap().extend_from_slice(results);
        match self.next_response().await {
            Scripted::Text(t) => Ok(LlmResponse::from_text(t)),
            Scripted::Response(r) => Ok(r),
            Scripted::Error(e) => Err(GatewayError::RequestFailed(e)),
        }
    }
}

/// Gateway that scripts each session by a marker found in its system prompt.
///
/// Each route holds a queue of session scripts; every new session whose
/// prompt matches pops the next one. Unmatched sessions error on first use.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    routes: Mutex<Vec<(String, VecDeque<Vec<Scripted>>)>>,
    pub(crate) system_prompts: Mutex<Vec<String>>,
    pub(crate) sent: Arc<Mutex<Vec<String>>>,
    pub(crate) tool_results: Arc<Mutex<Vec<ToolResultMessage>>>,
    pub(crate) gauge: Arc<ConcurrencyGauge>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn route(self, marker: &str, responses: Vec<Scripted>) -> Self {
        {
            let mut routes = self.routes.lock().unwrap();
            match routes.iter_mut().find(|(m, _)| m == marker) {
                Some((_, queue)) => queue.push_back(responses),
                None => routes.push((marker.to_string(), VecDeque::from([responses]))),
            }
        }
        self
    }

    /// How many sessions were created with a prompt containing `marker`
    pub(crate) fn sessions_for(&self, marker: &str) -> usize {
        self.system_prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.contains(marker))
            .count()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn create_session_with_system_prompt(
        &self,
        model: &Model,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        self.system_prompts
            .lock()
            .unwrap()
            .push(system_prompt.to_string());

        let responses = self
            .routes
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(marker, _)| system_prompt.contains(marker.as_str()))
            .and_then(|(_, queue)| queue.pop_front())
            .unwrap_or_default();

        Ok(Box::new(ScriptedSession {
            model: model.clone(),
            responses: Mutex::new(responses.into()),
            sent: Arc::clone(&self.sent),
            tool_results: Arc::clone(&self.tool_results),
            delay: self.delay,
            gauge: Arc::clone(&self.gauge),
        }))
    }
}

/// Tool executor exposing `search_subreddit` with a canned listing
pub(crate) struct RecordingSearchTool {
    spec: ToolSpec,
    pub(crate) calls: Mutex<Vec<ToolCall>>,
}

impl RecordingSearchTool {
    pub(crate) fn new() -> Self {
        let spec = ToolSpec::new().register(
            ToolDefinition::new("search_subreddit", "Search local threads")
                .with_parameter(ToolParameter::new("query", "Search terms", true)),
        );
        Self {
            spec,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolExecutorPort for RecordingSearchTool {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.calls.lock().unwrap().push(call.clone());
        ToolResult::success(
            &call.tool_name,
            "Candidate threads:\n1. Luteal rage (https://reddit.com/r/PMDD/1) score=2.5",
        )
    }
}

/// Every user prompt sent through sessions of this gateway, in send order
pub(crate) fn sent_prompts(gateway: &ScriptedGateway) -> Vec<String> {
    gateway.sent.lock().unwrap().clone()
}
