//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown node: {0} (expected one of yapper, definer, redditor, engager, auditor)")]
    UnknownNode(String),

    #[error("Unknown save bucket: {0} (expected one of journal, definitions, threads, drafts, audit_logs)")]
    UnknownBucket(String),

    #[error("Message cannot be empty")]
    EmptyMessage,
}

impl DomainError {
    /// Check if this error was caused by caller-supplied configuration
    /// rather than message content
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownNode(_) | DomainError::UnknownBucket(_)
        )
    }
}
