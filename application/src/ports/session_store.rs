//! Session store port
//!
//! Per-session conversation history and journal. The orchestration core only
//! ever reads a snapshot; [`RunSessionTurnUseCase`](crate::use_cases::run_session_turn::RunSessionTurnUseCase)
//! writes the results of each turn back.

use council_domain::{
    AuditLogEntry, ConversationTurn, NodeId, SaveBucket, SavedItem, SessionSnapshot,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Failed to persist session store: {0}")]
    Persistence(String),

    #[error("Failed to serialize session store: {0}")]
    Serialization(String),
}

/// Port for session state
///
/// Reads of an unknown session return an empty snapshot. Mutations create
/// the session on first use.
pub trait SessionStorePort: Send + Sync {
    /// A deep copy of the session's state
    fn snapshot(&self, session_id: &str) -> SessionSnapshot;

    /// The session's full conversation history
    fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.snapshot(session_id).conversation_history
    }

    fn append_turn(&self, session_id: &str, turn: ConversationTurn)
    -> Result<(), SessionStoreError>;

    fn set_structured_symptom_list(
        &self,
        session_id: &str,
        symptoms: Vec<String>,
    ) -> Result<(), SessionStoreError>;

    fn set_active_nodes(&self, session_id: &str, nodes: Vec<NodeId>)
    -> Result<(), SessionStoreError>;

    /// Record an audit entry, also saving it into the `audit_logs` bucket
    fn append_audit_log(
        &self,
        session_id: &str,
        entry: AuditLogEntry,
    ) -> Result<(), SessionStoreError>;

    fn save(
        &self,
        session_id: &str,
        bucket: SaveBucket,
        item: SavedItem,
    ) -> Result<(), SessionStoreError>;

    fn list_saved(&self, session_id: &str, bucket: SaveBucket) -> Vec<SavedItem> {
        self.snapshot(session_id)
            .saved
            .get(&bucket)
            .cloned()
            .unwrap_or_default()
    }

    /// Known session ids, sorted
    fn session_ids(&self) -> Vec<String>;
}
