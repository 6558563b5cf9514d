//! Domain layer for symptom-council
//!
//! This crate contains the core records, value objects and pure functions.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Nodes
//!
//! A node is one independently invoked model role with a fixed instruction
//! and output schema. One node leads each request; up to three supporting
//! nodes (definer, thread finder, drafter) run after it, and the auditor
//! reviews the merged result.
//!
//! ## Fallbacks
//!
//! Structured model output is parsed leniently. Every record has a
//! statically known fallback, so malformed output never fails a request.

pub mod conversation;
pub mod core;
pub mod orchestration;
pub mod parsing;
pub mod prompt;
pub mod safety;
pub mod search;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use conversation::{
    AuditLogEntry, ConversationTurn, HISTORY_WINDOW, Role, SaveBucket, SavedItem,
    SessionSnapshot, render_history, window,
};
pub use core::{error::DomainError, model::Model, node::NodeId};
pub use orchestration::{
    aggregate::{aggregate, dedupe_lines},
    entities::Phase,
    selection::{DRAFTER_TRIGGERS, resolve_search_query, select_supporting_nodes},
    value_objects::{
        AuditOutput, DefinerOutput, Definition, DrafterOutput, LeaderOutput,
        OrchestrationResult, SupportingOutput, ThreadFinderOutput, ThreadRecord,
    },
};
pub use parsing::{JsonObject, extract_json_object, parse_json_object_or};
pub use prompt::NodePromptTemplate;
pub use safety::{AUDIT_CONSTRAINTS, RuleScanner};
pub use search::{SearchDocument, SearchHit};
pub use session::response::{ContentBlock, LlmResponse, StopReason};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    value_objects::{ToolError, ToolResult},
};
