//! Supporting node selection and thread-finder query resolution

use super::value_objects::LeaderOutput;
use crate::core::node::NodeId;

/// Substrings (matched case-insensitively) that mark a message as asking for
/// a drafted message.
pub const DRAFTER_TRIGGERS: [&str; 7] = [
    "draft",
    "write",
    "post",
    "reddit",
    "community",
    "message",
    "send this",
];

/// Whether the message itself asks for something to be drafted
pub fn mentions_drafting(message: &str) -> bool {
    let lowered = message.to_lowercase();
    DRAFTER_TRIGGERS.iter().any(|t| lowered.contains(t))
}

/// Decide which supporting nodes run for this request.
///
/// Candidates are `enabled` (order kept, duplicates removed), or every
/// supporting node when `enabled` is empty. Non-supporting identities and
/// the active node are removed. The drafter (`engager`) also needs the
/// leader to mark the message engagement-ready or the message to mention
/// drafting.
pub fn select_supporting_nodes(
    active: NodeId,
    enabled: &[NodeId],
    leader_output: &LeaderOutput,
    message: &str,
) -> Vec<NodeId> {
    let candidates: &[NodeId] = if enabled.is_empty() {
        &NodeId::SUPPORTING
    } else {
        enabled
    };

    let drafting_requested = leader_output.engagement_ready || mentions_drafting(message);

    let mut selected: Vec<NodeId> = Vec::with_capacity(candidates.len());
    for &node in candidates {
        if !node.is_supporting() || node == active || selected.contains(&node) {
            continue;
        }
        if node == NodeId::Engager && !drafting_requested {
            continue;
        }
        selected.push(node);
    }
    selected
}

/// Query handed to the thread finder: the explicit query, then the leader's
/// research keywords joined by spaces, then the raw message. The first one
/// that is non-empty after trimming wins.
pub fn resolve_search_query(
    explicit: Option<&str>,
    leader_output: &LeaderOutput,
    message: &str,
) -> String {
    if let Some(query) = explicit.map(str::trim)
        && !query.is_empty()
    {
        return query.to_string();
    }

    let keywords = leader_output
        .research_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !keywords.is_empty() {
        return keywords;
    }

    message.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leader(engagement_ready: bool) -> LeaderOutput {
        LeaderOutput {
            engagement_ready,
            ..LeaderOutput::default()
        }
    }

    #[test]
    fn test_default_candidates_exclude_active() {
        let selected =
            select_supporting_nodes(NodeId::Definer, &[], &leader(true), "hello");
        assert_eq!(selected, vec![NodeId::Redditor, NodeId::Engager]);
    }

    #[test]
    fn test_default_candidates_without_drafting() {
        let selected = select_supporting_nodes(
            NodeId::Yapper,
            &[],
            &leader(false),
            "I've had cramping and mood swings for 10 days",
        );
        assert_eq!(selected, vec![NodeId::Definer, NodeId::Redditor]);
    }

    #[test]
    fn test_active_node_never_selected() {
        for active in NodeId::ALL {
            let selected =
                select_supporting_nodes(active, &NodeId::SUPPORTING, &leader(true), "draft");
            assert!(!selected.contains(&active));
        }
    }

    #[test]
    fn test_enabled_order_and_dedup() {
        let enabled = [
            NodeId::Redditor,
            NodeId::Yapper,
            NodeId::Definer,
            NodeId::Redditor,
            NodeId::Auditor,
        ];
        let selected = select_supporting_nodes(NodeId::Yapper, &enabled, &leader(false), "hi");
        assert_eq!(selected, vec![NodeId::Redditor, NodeId::Definer]);
    }

    #[test]
    fn test_drafter_triggered_by_message() {
        let selected = select_supporting_nodes(
            NodeId::Yapper,
            &[NodeId::Engager],
            &leader(false),
            "can you DRAFT a message for my doctor",
        );
        assert_eq!(selected, vec![NodeId::Engager]);
    }

    #[test]
    fn test_drafter_requires_trigger_or_readiness() {
        let selected = select_supporting_nodes(
            NodeId::Yapper,
            &[NodeId::Engager],
            &leader(false),
            "my head hurts",
        );
        assert!(selected.is_empty());

        let selected = select_supporting_nodes(
            NodeId::Yapper,
            &[NodeId::Engager],
            &leader(true),
            "my head hurts",
        );
        assert_eq!(selected, vec![NodeId::Engager]);
    }

    #[test]
    fn test_mentions_drafting() {
        assert!(mentions_drafting("Please send this to them"));
        assert!(mentions_drafting("which Reddit community?"));
        assert!(!mentions_drafting("I sent it already"));
    }

    #[test]
    fn test_query_precedence() {
        let mut out = LeaderOutput::default();
        out.research_keywords = vec!["pmdd".to_string(), " rage ".to_string()];

        assert_eq!(resolve_search_query(Some(" luteal "), &out, "msg"), "luteal");
        assert_eq!(resolve_search_query(Some("   "), &out, "msg"), "pmdd rage");
        assert_eq!(resolve_search_query(None, &out, "msg"), "pmdd rage");

        out.research_keywords = vec!["  ".to_string()];
        assert_eq!(resolve_search_query(None, &out, " my message "), "my message");
    }
}
