//! Safety review domain
//!
//! The deterministic half of the safety audit: a fixed, ordered set of
//! patterns run over the aggregated text. The model-based half lives in the
//! application layer and receives [`AUDIT_CONSTRAINTS`] in its prompt.

mod rules;

pub use rules::{AUDIT_CONSTRAINTS, RULE_PATTERNS, RuleScanner, SafetyRule};
