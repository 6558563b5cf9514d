//! Orchestration domain entities

use serde::{Deserialize, Serialize};

/// Phase of one orchestration request, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Leader turns the message into a structured record
    LeaderParse,
    /// Leader writes the conversational reply
    LeaderReply,
    /// Supporting nodes run concurrently
    Supporting,
    /// Safety review of the aggregated text
    Audit,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::LeaderParse,
        Phase::LeaderReply,
        Phase::Supporting,
        Phase::Audit,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Phase::LeaderParse => "leader_parse",
            Phase::LeaderReply => "leader_reply",
            Phase::Supporting => "supporting",
            Phase::Audit => "audit",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::LeaderParse => "Leader Parse",
            Phase::LeaderReply => "Leader Reply",
            Phase::Supporting => "Supporting Nodes",
            Phase::Audit => "Safety Audit",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
