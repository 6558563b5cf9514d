//! Node identity value object
//!
//! The set of nodes is fixed. Any of the five identities may act as the
//! leader-style node for a turn; only three of them can also run as
//! supporting workers.
//!
//! | Node | Supporting role |
//! |------|-----------------|
//! | `yapper` | none (leader only) |
//! | `definer` | terminology definer |
//! | `redditor` | community-thread finder |
//! | `engager` | message drafter |
//! | `auditor` | none (always runs last as the safety reviewer) |

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identity of one node (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeId {
    Yapper,
    Definer,
    Redditor,
    Engager,
    Auditor,
}

impl NodeId {
    /// All node identities, in display order
    pub const ALL: [NodeId; 5] = [
        NodeId::Yapper,
        NodeId::Definer,
        NodeId::Redditor,
        NodeId::Engager,
        NodeId::Auditor,
    ];

    /// The supporting nodes, in default dispatch order
    pub const SUPPORTING: [NodeId; 3] = [NodeId::Definer, NodeId::Redditor, NodeId::Engager];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeId::Yapper => "yapper",
            NodeId::Definer => "definer",
            NodeId::Redditor => "redditor",
            NodeId::Engager => "engager",
            NodeId::Auditor => "auditor",
        }
    }

    /// Human-facing persona name
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeId::Yapper => "The Yapper",
            NodeId::Definer => "The Definer",
            NodeId::Redditor => "The Redditor",
            NodeId::Engager => "The Engager",
            NodeId::Auditor => "The Auditor",
        }
    }

    /// Whether this node can run as a supporting worker
    pub fn is_supporting(&self) -> bool {
        Self::SUPPORTING.contains(self)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yapper" => Ok(NodeId::Yapper),
            "definer" => Ok(NodeId::Definer),
            "redditor" => Ok(NodeId::Redditor),
            "engager" => Ok(NodeId::Engager),
            "auditor" => Ok(NodeId::Auditor),
            _ => Err(DomainError::UnknownNode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_roundtrip() {
        for node in NodeId::ALL {
            let parsed: NodeId = node.as_str().parse().unwrap();
            assert_eq!(node, parsed);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Definer".parse::<NodeId>().unwrap(), NodeId::Definer);
        assert_eq!(" AUDITOR ".parse::<NodeId>().unwrap(), NodeId::Auditor);
    }

    #[test]
    fn test_unknown_node() {
        let err = "oracle".parse::<NodeId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownNode("oracle".to_string()));
    }

    #[test]
    fn test_supporting_membership() {
        assert!(NodeId::Definer.is_supporting());
        assert!(NodeId::Redditor.is_supporting());
        assert!(NodeId::Engager.is_supporting());
        assert!(!NodeId::Yapper.is_supporting());
        assert!(!NodeId::Auditor.is_supporting());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&NodeId::Redditor).unwrap(), "\"redditor\"");
    }
}
