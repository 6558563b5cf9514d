//! Orchestration value objects: the records each node produces.
//!
//! - [`LeaderOutput`] - structured reading of the user message (leader parse phase)
//! - [`SupportingOutput`] - one of the three supporting node records
//! - [`AuditOutput`] - safety review of the aggregated text
//! - [`OrchestrationResult`] - everything a single request produced
//!
//! Every record is built from a completion with `from_completion`, which
//! never fails: malformed output degrades to the record's `fallback`.

use crate::core::node::NodeId;
use crate::parsing::fields::{
    bool_field, number_field, object_field, object_list_field, string_list_field, text_field,
};
use crate::parsing::{JsonObject, extract_json_object};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured reading of the user message produced by the leader parse phase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderOutput {
    pub narrative_summary: String,
    pub candidate_symptoms: Vec<String>,
    pub questions_to_clarify: Vec<String>,
    pub research_keywords: Vec<String>,
    pub engagement_ready: bool,
    pub raw_symptom_phrases: Vec<String>,
    pub timeline_information: String,
    pub reported_impacts: Vec<String>,
    pub uncertainties: Vec<String>,
}

impl LeaderOutput {
    /// All fields empty except the summary, which carries the raw completion.
    pub fn fallback(raw: &str) -> Self {
        Self {
            narrative_summary: raw.to_string(),
            ..Self::default()
        }
    }

    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            narrative_summary: text_field(obj, "narrative_summary"),
            candidate_symptoms: string_list_field(obj, "candidate_symptoms"),
            questions_to_clarify: string_list_field(obj, "questions_to_clarify"),
            research_keywords: string_list_field(obj, "research_keywords"),
            engagement_ready: bool_field(obj, "engagement_ready"),
            raw_symptom_phrases: string_list_field(obj, "raw_symptom_phrases"),
            timeline_information: text_field(obj, "timeline_information"),
            reported_impacts: string_list_field(obj, "reported_impacts"),
            uncertainties: string_list_field(obj, "uncertainties"),
        }
    }

    pub fn from_completion(raw: &str) -> Self {
        extract_json_object(raw)
            .map(|obj| Self::from_object(&obj))
            .unwrap_or_else(|| Self::fallback(raw))
    }
}

/// A term paired with its plain-language explanation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

impl Definition {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }

    /// Both term and definition are non-empty after trimming
    pub fn is_well_formed(&self) -> bool {
        !self.term.trim().is_empty() && !self.definition.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinerOutput {
    pub standardized_symptom_list: Vec<String>,
    pub definitions: Vec<Definition>,
    pub evidence_mapping: JsonObject,
}

impl DefinerOutput {
    pub fn fallback(_raw: &str) -> Self {
        Self::default()
    }

    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            standardized_symptom_list: string_list_field(obj, "standardized_symptom_list"),
            definitions: object_list_field(obj, "definitions")
                .iter()
                .map(|d| Definition::new(text_field(d, "term"), text_field(d, "definition")))
                .collect(),
            evidence_mapping: object_field(obj, "evidence_mapping"),
        }
    }
}

/// One community thread suggested by the thread finder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadRecord {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub score: f64,
}

impl ThreadRecord {
    /// Title and url are non-empty after trimming
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && !self.url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadFinderOutput {
    pub relevant_threads: Vec<ThreadRecord>,
    pub subreddit_metadata: JsonObject,
}

impl ThreadFinderOutput {
    pub fn fallback(_raw: &str) -> Self {
        Self::default()
    }

    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            relevant_threads: object_list_field(obj, "relevant_threads")
                .iter()
                .map(|t| ThreadRecord {
                    title: text_field(t, "title"),
                    url: text_field(t, "url"),
                    summary: text_field(t, "summary"),
                    score: number_field(t, "score"),
                })
                .collect(),
            subreddit_metadata: object_field(obj, "subreddit_metadata"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrafterOutput {
    pub draft_message: String,
    pub posting_guidelines: Vec<String>,
    pub questions_for_medical_professional: Vec<String>,
}

impl DrafterOutput {
    /// The raw completion becomes the draft.
    pub fn fallback(raw: &str) -> Self {
        Self {
            draft_message: raw.to_string(),
            ..Self::default()
        }
    }

    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            draft_message: text_field(obj, "draft_message"),
            posting_guidelines: string_list_field(obj, "posting_guidelines"),
            questions_for_medical_professional: string_list_field(
                obj,
                "questions_for_medical_professional",
            ),
        }
    }
}

/// Output of one supporting node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupportingOutput {
    Definer(DefinerOutput),
    ThreadFinder(ThreadFinderOutput),
    Drafter(DrafterOutput),
}

impl SupportingOutput {
    /// The fixed fallback record for `node`, or `None` if it is not a
    /// supporting node.
    pub fn fallback(node: NodeId, raw: &str) -> Option<Self> {
        match node {
            NodeId::Definer => Some(Self::Definer(DefinerOutput::fallback(raw))),
            NodeId::Redditor => Some(Self::ThreadFinder(ThreadFinderOutput::fallback(raw))),
            NodeId::Engager => Some(Self::Drafter(DrafterOutput::fallback(raw))),
            NodeId::Yapper | NodeId::Auditor => None,
        }
    }

    /// Parse `raw` into the record shape owned by `node`.
    pub fn from_completion(node: NodeId, raw: &str) -> Option<Self> {
        match extract_json_object(raw) {
            Some(obj) => Self::from_object(node, &obj),
            None => Self::fallback(node, raw),
        }
    }

    /// Build the record for `node` from an already extracted object
    pub fn from_object(node: NodeId, obj: &JsonObject) -> Option<Self> {
        match node {
            NodeId::Definer => Some(Self::Definer(DefinerOutput::from_object(obj))),
            NodeId::Redditor => Some(Self::ThreadFinder(ThreadFinderOutput::from_object(obj))),
            NodeId::Engager => Some(Self::Drafter(DrafterOutput::from_object(obj))),
            NodeId::Yapper | NodeId::Auditor => None,
        }
    }

    pub fn as_definer(&self) -> Option<&DefinerOutput> {
        match self {
            Self::Definer(out) => Some(out),
            _ => None,
        }
    }

    pub fn as_thread_finder(&self) -> Option<&ThreadFinderOutput> {
        match self {
            Self::ThreadFinder(out) => Some(out),
            _ => None,
        }
    }

    pub fn as_drafter(&self) -> Option<&DrafterOutput> {
        match self {
            Self::Drafter(out) => Some(out),
            _ => None,
        }
    }
}

/// Safety review of the aggregated text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOutput {
    pub flagged_segments: Vec<String>,
    pub revision_suggestions: Vec<String>,
    pub safe_output: String,
}

impl AuditOutput {
    /// Nothing flagged; the aggregated text passes through.
    pub fn fallback(aggregated: &str) -> Self {
        Self {
            safe_output: aggregated.to_string(),
            ..Self::default()
        }
    }

    pub fn from_object(obj: &JsonObject) -> Self {
        Self {
            flagged_segments: string_list_field(obj, "flagged_segments"),
            revision_suggestions: string_list_field(obj, "revision_suggestions"),
            safe_output: text_field(obj, "safe_output"),
        }
    }

    /// Parse an audit completion; on failure fall back to `aggregated`.
    pub fn from_completion(raw: &str, aggregated: &str) -> Self {
        extract_json_object(raw)
            .map(|obj| Self::from_object(&obj))
            .unwrap_or_else(|| Self::fallback(aggregated))
    }
}

/// Everything a single orchestration request produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Final, audited response text. Never empty.
    pub response: String,
    pub leader_response: String,
    pub leader_output: LeaderOutput,
    /// Outputs of the supporting nodes that succeeded
    pub supporting_outputs: BTreeMap<NodeId, SupportingOutput>,
    pub aggregated_output: String,
    pub audit_output: AuditOutput,
    /// Every dispatched supporting node, including ones that failed
    pub selected_supporting_nodes: Vec<NodeId>,
    pub thread_summaries: Vec<ThreadRecord>,
}

impl OrchestrationResult {
    /// Supporting nodes that were dispatched but produced no output
    pub fn failed_nodes(&self) -> Vec<NodeId> {
        self.selected_supporting_nodes
            .iter()
            .copied()
            .filter(|node| !self.supporting_outputs.contains_key(node))
            .collect()
    }
}
