//! Console output formatter for orchestration results

use colored::Colorize;
use council_domain::{NodeId, OrchestrationResult, SearchHit, SupportingOutput};

/// Formats orchestration results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Response followed by each node's structured output
    pub fn format(result: &OrchestrationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Symptom Council"));
        output.push_str("\n\n");
        output.push_str(&result.response);
        output.push('\n');

        output.push_str(&Self::section_header("Leader"));
        let leader = &result.leader_output;
        output.push_str(&Self::field("Summary", &leader.narrative_summary));
        output.push_str(&Self::list("Candidate symptoms", &leader.candidate_symptoms));
        output.push_str(&Self::list("Research keywords", &leader.research_keywords));
        output.push_str(&Self::list("To clarify", &leader.questions_to_clarify));

        output.push_str(&Self::section_header("Supporting Nodes"));
        for node in &result.selected_supporting_nodes {
            let title = format!("── {} ──", node.display_name());
            match result.supporting_outputs.get(node) {
                Some(supporting) => {
                    output.push_str(&format!("\n{}\n", title.yellow().bold()));
                    output.push_str(&Self::supporting(supporting));
                }
                None => {
                    output.push_str(&format!("\n{}\n", title.red().bold()));
                    output.push_str("  (failed; omitted from the response)\n");
                }
            }
        }
        if result.selected_supporting_nodes.is_empty() {
            output.push_str("  (none selected)\n");
        }

        output.push_str(&Self::section_header("Safety Audit"));
        let audit = &result.audit_output;
        if audit.flagged_segments.is_empty() {
            output.push_str(&format!("  {}\n", "No flags".green()));
        } else {
            output.push_str(&Self::list("Flagged", &audit.flagged_segments));
        }
        output.push_str(&Self::list("Suggestions", &audit.revision_suggestions));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &OrchestrationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// The audited response only
    pub fn format_response_only(result: &OrchestrationResult) -> String {
        format!("{}\n", result.response)
    }

    /// Search collaborator results, in the tool's listing order
    pub fn format_search(query: &str, hits: &[SearchHit]) -> String {
        let mut output = format!("{} {}\n", "Search:".cyan().bold(), query);
        if hits.is_empty() {
            output.push_str("No matching local Reddit threads found.\n");
            return output;
        }
        for (i, hit) in hits.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {}\n   {}\n   {} {}  {} {}  {} {}\n",
                i + 1,
                hit.title.bold(),
                hit.url.dimmed(),
                "score".dimmed(),
                hit.score,
                "ups".dimmed(),
                hit.ups,
                "comments".dimmed(),
                hit.comments
            ));
        }
        output
    }

    /// One line per node identity with its role
    pub fn format_nodes() -> String {
        NodeId::ALL
            .iter()
            .map(|node| {
                let role = match node {
                    NodeId::Yapper => "leader: conversational intake",
                    NodeId::Definer => "supporting: medical term definitions",
                    NodeId::Redditor => "supporting: community thread finder",
                    NodeId::Engager => "supporting: message drafter",
                    NodeId::Auditor => "safety reviewer (always last)",
                };
                format!("  {:<10} {:<14} {}", node.as_str(), node.display_name(), role)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn supporting(output: &SupportingOutput) -> String {
        match output {
            SupportingOutput::Definer(definer) => {
                let mut s = String::new();
                for d in &definer.definitions {
                    s.push_str(&format!("  * {}: {}\n", d.term.bold(), d.definition));
                }
                s.push_str(&Self::list("Standardized", &definer.standardized_symptom_list));
                s
            }
            SupportingOutput::ThreadFinder(finder) => finder
                .relevant_threads
                .iter()
                .map(|t| format!("  * {} ({}) score={}\n", t.title, t.url.dimmed(), t.score))
                .collect(),
            SupportingOutput::Drafter(drafter) => {
                let mut s = Self::indent(&drafter.draft_message, "  ");
                s.push('\n');
                s.push_str(&Self::list("Guidelines", &drafter.posting_guidelines));
                s.push_str(&Self::list(
                    "Ask your clinician",
                    &drafter.questions_for_medical_professional,
                ));
                s
            }
        }
    }

    fn field(label: &str, value: &str) -> String {
        if value.trim().is_empty() {
            return String::new();
        }
        format!("  {} {}\n", format!("{}:", label).cyan(), value)
    }

    fn list(label: &str, items: &[String]) -> String {
        if items.is_empty() {
            return String::new();
        }
        format!("  {} {}\n", format!("{}:", label).cyan(), items.join(", "))
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
