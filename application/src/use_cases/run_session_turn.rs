//! Run Session Turn use case
//!
//! One conversational turn against a stored session: reads the history,
//! runs the orchestration, then writes the turn and its journal entries back.

use super::run_orchestration::{
    RunOrchestrationError, RunOrchestrationInput, RunOrchestrationUseCase,
};
use crate::ports::progress::OrchestrationProgress;
use crate::ports::session_store::{SessionStoreError, SessionStorePort};
use chrono::Utc;
use council_domain::{
    AuditLogEntry, ConversationTurn, DomainError, Model, NodeId, OrchestrationResult,
    SaveBucket, SavedItem,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RunSessionTurnError {
    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),

    #[error(transparent)]
    Orchestration(#[from] RunOrchestrationError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Input for one session turn
#[derive(Debug, Clone)]
pub struct RunSessionTurnInput {
    pub session_id: String,
    pub message: String,
    pub model: Model,
    pub active_node: String,
    pub enabled_nodes: Vec<String>,
    pub search_query: Option<String>,
    /// Bucket name to save the response into
    pub save_to: Option<String>,
}

impl RunSessionTurnInput {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>, model: Model) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            model,
            active_node: NodeId::Yapper.to_string(),
            enabled_nodes: Vec::new(),
            search_query: None,
            save_to: None,
        }
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

    pub fn with_save_to(mut self, bucket: impl Into<String>) -> Self {
        self.save_to = Some(bucket.into());
        self
    }
}

pub struct RunSessionTurnUseCase {
    orchestration: RunOrchestrationUseCase,
    store: Arc<dyn SessionStorePort>,
}

impl Clone for RunSessionTurnUseCase {
    fn clone(&self) -> Self {
        Self {
            orchestration: self.orchestration.clone(),
            store: self.store.clone(),
        }
    }
}

impl RunSessionTurnUseCase {
    pub fn new(orchestration: RunOrchestrationUseCase, store: Arc<dyn SessionStorePort>) -> Self {
        Self {
            orchestration,
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn SessionStorePort> {
        &self.store
    }

    pub async fn execute(
        &self,
        input: RunSessionTurnInput,
        progress: &dyn OrchestrationProgress,
    ) -> Result<OrchestrationResult, RunSessionTurnError> {
        if input.message.trim().is_empty() {
            return Err(RunSessionTurnError::InvalidInput(DomainError::EmptyMessage));
        }
        let bucket = input
            .save_to
            .as_deref()
            .map(str::parse::<SaveBucket>)
            .transpose()
            .map_err(RunSessionTurnError::InvalidInput)?;
        let active: NodeId = input
            .active_node
            .parse()
            .map_err(RunSessionTurnError::InvalidInput)?;

        let history = self.store.history(&input.session_id);
        debug!(
            "Session {}: {} prior turns",
            input.session_id,
            history.len()
        );

        let mut request = RunOrchestrationInput::new(input.message.clone(), input.model)
            .with_history(history)
            .with_active_node(input.active_node)
            .with_enabled_nodes(input.enabled_nodes);
        if let Some(query) = input.search_query {
            request = request.with_search_query(query);
        }

        let result = self.orchestration.execute(request, progress).await?;
        self.record(&input.session_id, &input.message, active, bucket, &result)?;

        info!("Session {} turn recorded", input.session_id);
        Ok(result)
    }

    fn record(
        &self,
        session_id: &str,
        message: &str,
        active: NodeId,
        bucket: Option<SaveBucket>,
        result: &OrchestrationResult,
    ) -> Result<(), SessionStoreError> {
        let timestamp = Utc::now().to_rfc3339();

        self.store
            .append_turn(session_id, ConversationTurn::user(message))?;
        self.store
            .append_turn(session_id, ConversationTurn::assistant(&result.response))?;
        self.store.set_structured_symptom_list(
            session_id,
            result.leader_output.candidate_symptoms.clone(),
        )?;

        let mut nodes = vec![active];
        nodes.extend(result.selected_supporting_nodes.iter().copied());
        self.store.set_active_nodes(session_id, nodes)?;

        self.store.append_audit_log(
            session_id,
            AuditLogEntry {
                timestamp: timestamp.clone(),
                active_node: active,
                flagged_segments: result.audit_output.flagged_segments.clone(),
                revision_suggestions: result.audit_output.revision_suggestions.clone(),
            },
        )?;

        if let Some(bucket) = bucket {
            self.store.save(
                session_id,
                bucket,
                SavedItem {
                    timestamp,
                    node: Some(active),
                    message: Some(message.to_string()),
                    content: result.response.clone(),
                },
            )?;
        }
        Ok(())
    }
}
