//! Prompt templates for each node invocation

use crate::conversation::{ConversationTurn, render_history};
use crate::core::node::NodeId;
use crate::orchestration::value_objects::LeaderOutput;
use crate::safety::AUDIT_CONSTRAINTS;

/// Templates for generating prompts at each phase
pub struct NodePromptTemplate;

impl NodePromptTemplate {
    /// Persona line for a node identity
    pub fn persona(node: NodeId) -> &'static str {
        match node {
            NodeId::Yapper => {
                "You are \"The Yapper\", a curious and supportive journaling assistant who helps users describe symptoms and lived experience in detail."
            }
            NodeId::Definer => {
                "You are \"The Definer\", focused on clear, plain-language medical definitions that mention uncertainty when appropriate."
            }
            NodeId::Redditor => {
                "You are \"The Redditor\", focused on discovering relevant community threads and subreddits."
            }
            NodeId::Engager => {
                "You are \"The Engager\", helping draft respectful community or doctor-facing messages."
            }
            NodeId::Auditor => {
                "You are \"The Auditor\", focused on safety and ethics: you flag risky phrasing and suggest safer rewrites."
            }
        }
    }

    /// The one sentence that tilts the leader toward the active identity
    pub fn leader_emphasis(node: NodeId) -> &'static str {
        match node {
            NodeId::Yapper => {
                "Emphasis: draw out detail about how the symptoms feel and how they affect daily life."
            }
            NodeId::Definer => {
                "Emphasis: notice medical or technical terms the user uses or may need explained."
            }
            NodeId::Redditor => {
                "Emphasis: pick research keywords that would find similar community discussions."
            }
            NodeId::Engager => {
                "Emphasis: note whether the user wants help writing a message or post."
            }
            NodeId::Auditor => {
                "Emphasis: note any wording that could be read as a diagnosis or medical advice."
            }
        }
    }

    /// System instruction for the leader parse phase
    pub fn leader_parse_system(active: NodeId) -> String {
        format!(
            r#"{persona}
You read the user's latest message in the context of the conversation and extract structured facts.
Do not diagnose. Keep language non-diagnostic.
{emphasis}

Respond with a single JSON object and nothing else, using exactly these keys:
{{
  "narrative_summary": "one or two sentences restating what the user shared",
  "candidate_symptoms": ["short symptom keywords, in the order mentioned"],
  "questions_to_clarify": ["gentle follow-up questions"],
  "research_keywords": ["search terms for community threads"],
  "engagement_ready": false,
  "raw_symptom_phrases": ["the user's own wording for each symptom"],
  "timeline_information": "when symptoms started, how long they last, cycle timing",
  "reported_impacts": ["effects on sleep, work, relationships, ..."],
  "uncertainties": ["things the user is unsure about"]
}}
Set "engagement_ready" to true only if the user wants help writing a post or message."#,
            persona = Self::persona(active),
            emphasis = Self::leader_emphasis(active),
        )
    }

    /// User content for the leader parse phase
    pub fn leader_parse_prompt(message: &str, history: &[ConversationTurn]) -> String {
        format!(
            r#"Conversation so far:
{history}

Latest user message:
{message}"#,
            history = render_history(history),
        )
    }

    /// System instruction for the leader reply phase
    pub fn leader_reply_system(active: NodeId) -> String {
        format!(
            r#"{persona}
Write the conversational reply to the user's latest message.
Acknowledge what they shared, reflect it back in plain language, and ask at most two of the clarifying questions.
Do not diagnose, do not prescribe treatment, and suggest professional care when relevant.
Reply in plain prose, not JSON.
Do not end with a stock closing phrase; vary how you close from one reply to the next."#,
            persona = Self::persona(active),
        )
    }

    /// User content for the leader reply phase
    pub fn leader_reply_prompt(
        message: &str,
        history: &[ConversationTurn],
        leader_output: &LeaderOutput,
    ) -> String {
        let record = serde_json::to_string_pretty(leader_output).unwrap_or_default();
        format!(
            r#"Conversation so far:
{history}

Latest user message:
{message}

Structured notes about this message:
{record}"#,
            history = render_history(history),
        )
    }

    /// System instruction for a supporting node. `None` for identities that
    /// never run as supporting workers.
    pub fn supporting_system(node: NodeId) -> Option<String> {
        let schema = match node {
            NodeId::Definer => {
                r#"Explain the medical terms relevant to the user's symptoms in plain language.
Respond with a single JSON object and nothing else:
{
  "standardized_symptom_list": ["standard names for the reported symptoms"],
  "definitions": [{"term": "term", "definition": "short neutral explanation"}],
  "evidence_mapping": {"user phrase": "standard term"}
}"#
            }
            NodeId::Redditor => {
                r#"Find community threads where people describe similar experiences.
You may call the search_subreddit tool to look up local threads; only suggest threads it returns.
Do not claim medical certainty.
Respond with a single JSON object and nothing else:
{
  "relevant_threads": [{"title": "thread title", "url": "thread url", "summary": "why it is relevant", "score": 0.0}],
  "subreddit_metadata": {"subreddit": "name", "notes": "posting norms or tone"}
}"#
            }
            NodeId::Engager => {
                r#"Draft a respectful message the user could post to a community or bring to a doctor.
Keep the tone clear, ethical and non-diagnostic.
Respond with a single JSON object and nothing else:
{
  "draft_message": "the full draft",
  "posting_guidelines": ["tips for posting"],
  "questions_for_medical_professional": ["questions to ask a clinician"]
}"#
            }
            NodeId::Yapper | NodeId::Auditor => return None,
        };
        Some(format!("{}\n{}", Self::persona(node), schema))
    }

    /// User content for a supporting node
    pub fn supporting_prompt(
        node: NodeId,
        leader_output: &LeaderOutput,
        history: &[ConversationTurn],
        task: &str,
        search_query: &str,
    ) -> String {
        let record = serde_json::to_string_pretty(leader_output).unwrap_or_default();
        let mut prompt = format!(
            r#"Task:
{task}

Structured notes from the lead node:
{record}

Conversation so far:
{history}"#,
            history = render_history(history),
        );

        if node == NodeId::Redditor {
            prompt.push_str(&format!("\n\nSearch query:\n{}", search_query));
        }

        prompt
    }

    /// System instruction for the model audit
    pub fn auditor_system() -> String {
        let constraints = AUDIT_CONSTRAINTS
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"{persona}
Review the response below against these constraints:
{constraints}

Respond with a single JSON object and nothing else:
{{
  "flagged_segments": ["exact phrases that break a constraint"],
  "revision_suggestions": ["how to rephrase each flagged segment"],
  "safe_output": "the full response rewritten to satisfy every constraint"
}}"#,
            persona = Self::persona(NodeId::Auditor),
        )
    }

    /// User content for the model audit
    pub fn auditor_prompt(aggregated: &str) -> String {
        format!("Response to review:\n{}", aggregated)
    }
}
