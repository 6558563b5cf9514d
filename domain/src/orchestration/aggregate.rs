//! Deterministic merge of node outputs into one text block

use super::value_objects::{LeaderOutput, SupportingOutput};
use crate::core::node::NodeId;
use crate::core::string::collapse_whitespace;
use std::collections::{BTreeMap, HashSet};

const MAX_DEFINITIONS: usize = 3;
const MAX_THREADS: usize = 2;
const MAX_SYMPTOM_KEYWORDS: usize = 5;

/// Used when no node produced any usable text
pub const ACKNOWLEDGEMENT: &str =
    "Thanks for sharing. I've noted what you described so far.";

/// Merge the leader reply and supporting outputs.
///
/// Sections, in order: leader reply, `- term: definition` lines,
/// `- title (url)` lines, draft message, captured symptom keywords. Each section appears only when
/// it has content. The result is line-deduplicated with [`dedupe_lines`]
/// and is never empty.
pub fn aggregate(
    leader_reply: &str,
    leader_output: &LeaderOutput,
    supporting: &BTreeMap<NodeId, SupportingOutput>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !leader_reply.trim().is_empty() {
        lines.extend(leader_reply.lines().map(str::to_string));
    }

    if let Some(definer) = supporting.get(&NodeId::Definer).and_then(|o| o.as_definer()) {
        let terms: Vec<String> = definer
            .definitions
            .iter()
            .filter(|d| d.is_well_formed())
            .take(MAX_DEFINITIONS)
            .map(|d| format!("- {}: {}", d.term.trim(), d.definition.trim()))
            .collect();
        lines.extend(terms);
    }

    if let Some(finder) = supporting
        .get(&NodeId::Redditor)
        .and_then(|o| o.as_thread_finder())
    {
        let threads: Vec<String> = finder
            .relevant_threads
            .iter()
            .filter(|t| t.is_well_formed())
            .take(MAX_THREADS)
            .map(|t| format!("- {} ({})", t.title.trim(), t.url.trim()))
            .collect();
        lines.extend(threads);
    }

    if let Some(drafter) = supporting.get(&NodeId::Engager).and_then(|o| o.as_drafter())
        && !drafter.draft_message.trim().is_empty()
    {
        lines.extend(drafter.draft_message.lines().map(str::to_string));
    }

    let keywords: Vec<&str> = leader_output
        .candidate_symptoms
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(MAX_SYMPTOM_KEYWORDS)
        .collect();
    if !keywords.is_empty() {
        lines.push(format!("Captured symptom keywords: {}", keywords.join(", ")));
    }

    let deduped = dedupe_lines(&lines);
    if !deduped.is_empty() {
        return deduped.join("\n");
    }

    let summary = leader_output.narrative_summary.trim();
    if summary.is_empty() {
        ACKNOWLEDGEMENT.to_string()
    } else {
        summary.to_string()
    }
}

/// Dedup key: trimmed, internal whitespace collapsed, lowercased
pub fn line_key(line: &str) -> String {
    collapse_whitespace(line).to_lowercase()
}

/// Drop lines whose [`line_key`] was already seen, keeping first-seen order
/// and the original text.
///
/// Blank lines never enter the seen set. A run of blank lines between two
/// kept lines collapses to one empty line; leading and trailing blanks are
/// dropped.
pub fn dedupe_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<String> = Vec::new();
    let mut pending_break = false;

    for line in lines.iter().map(AsRef::as_ref) {
        let key = line_key(line);
        if key.is_empty() {
            pending_break = !out.is_empty();
            continue;
        }
        if !seen.insert(key) {
            continue;
        }
        if pending_break {
            out.push(String::new());
            pending_break = false;
        }
        out.push(line.to_string());
    }
    out
}
