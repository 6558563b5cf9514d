//! Session journal records
//!
//! Value types a session store keeps next to the conversation history. The
//! orchestration core never mutates them; the session-turn use case hands
//! them to the store after each turn.

use super::entities::ConversationTurn;
use crate::core::error::DomainError;
use crate::core::node::NodeId;
use serde::{Deserialize, Serialize};

/// Named bucket a user can save content into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveBucket {
    Journal,
    Definitions,
    Threads,
    Drafts,
    AuditLogs,
}

impl SaveBucket {
    pub const ALL: [SaveBucket; 5] = [
        SaveBucket::Journal,
        SaveBucket::Definitions,
        SaveBucket::Threads,
        SaveBucket::Drafts,
        SaveBucket::AuditLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SaveBucket::Journal => "journal",
            SaveBucket::Definitions => "definitions",
            SaveBucket::Threads => "threads",
            SaveBucket::Drafts => "drafts",
            SaveBucket::AuditLogs => "audit_logs",
        }
    }
}

impl std::fmt::Display for SaveBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SaveBucket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaveBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s.trim())
            .ok_or_else(|| DomainError::UnknownBucket(s.to_string()))
    }
}

/// An item saved into a bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    /// RFC 3339 timestamp
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub content: String,
}

/// Audit findings recorded for one orchestration turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub active_node: NodeId,
    pub flagged_segments: Vec<String>,
    pub revision_suggestions: Vec<String>,
}

/// Read snapshot of one session's state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub conversation_history: Vec<ConversationTurn>,
    pub structured_symptom_list: Vec<String>,
    pub active_nodes: Vec<NodeId>,
    pub audit_log: Vec<AuditLogEntry>,
    pub saved: std::collections::BTreeMap<SaveBucket, Vec<SavedItem>>,
    /// RFC 3339 timestamp of the last mutation
    pub updated_at: Option<String>,
}
