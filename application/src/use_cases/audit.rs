//! Safety auditor: rule scan plus one model audit over the aggregated text.

use super::invoke_node::NodeInvoker;
use crate::ports::llm_gateway::GatewayError;
use council_domain::{AuditOutput, Model, NodePromptTemplate, RuleScanner, dedupe_lines, extract_json_object};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SafetyAuditor {
    invoker: NodeInvoker,
    scanner: RuleScanner,
}

impl SafetyAuditor {
    pub fn new(invoker: NodeInvoker) -> Self {
        Self {
            invoker,
            scanner: RuleScanner,
        }
    }

    /// Audit `aggregated`. The returned `safe_output` is the final response.
    pub async fn audit(&self, model: &Model, aggregated: &str) -> Result<AuditOutput, GatewayError> {
        let rule_flags = self.scanner.scan(aggregated);
        debug!("Rule scan raised {} flags", rule_flags.len());

        let raw = self
            .invoker
            .invoke(
                &NodePromptTemplate::auditor_system(),
                model,
                &NodePromptTemplate::auditor_prompt(aggregated),
                None,
            )
            .await?;

        let model_audit = extract_json_object(&raw)
            .map(|obj| AuditOutput::from_object(&obj))
            .unwrap_or_else(|| {
                warn!("Audit output was not JSON; passing the aggregated text through");
                AuditOutput::fallback(aggregated)
            });
        Ok(combine_audit(model_audit, rule_flags, aggregated))
    }
}

/// Merge the model audit with the rule flags.
///
/// Flags are the model's followed by the rule scan's, line-deduplicated.
/// A non-blank `safe_output` (trimmed) is kept; otherwise the aggregated text
/// is used verbatim.
pub fn combine_audit(model_audit: AuditOutput, rule_flags: Vec<String>, aggregated: &str) -> AuditOutput {
    let mut flags = model_audit.flagged_segments;
    flags.extend(rule_flags);
    flags.retain(|flag| !flag.trim().is_empty());

    let safe_output = match model_audit.safe_output.trim() {
        "" => aggregated.to_string(),
        rewritten => rewritten.to_string(),
    };

    AuditOutput {
        flagged_segments: dedupe_lines(&flags),
        revision_suggestions: model_audit.revision_suggestions,
        safe_output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{AUDITOR, Scripted, ScriptedGateway, text};
    use std::sync::Arc;

    fn auditor(responses: Vec<Scripted>) -> SafetyAuditor {
        let gateway = Arc::new(ScriptedGateway::new().route(AUDITOR, responses));
        SafetyAuditor::new(NodeInvoker::new(gateway))
    }

    #[tokio::test]
    async fn test_parse_fallback_passes_text_through() {
        let audit = auditor(vec![text("Looks fine to me!")])
            .audit(&Model::default(), "Keep a journal.")
            .await
            .unwrap();

        assert_eq!(audit.safe_output, "Keep a journal.");
        assert!(audit.flagged_segments.is_empty());
    }

    #[tokio::test]
    async fn test_model_rewrite_is_used() {
        let raw = r#"{"flagged_segments": ["you definitely have PMDD"],
            "revision_suggestions": ["say 'some people experience'"],
            "safe_output": "  Some people experience similar symptoms.  "}"#;
        let audit = auditor(vec![text(raw)])
            .audit(&Model::default(), "You definitely have PMDD.")
            .await
            .unwrap();

        assert_eq!(audit.safe_output, "Some people experience similar symptoms.");
        assert_eq!(
            audit.flagged_segments,
            vec![
                "you definitely have PMDD".to_string(),
                r#"diagnostic certainty: "You definitely have""#.to_string(),
            ]
        );
        assert_eq!(audit.revision_suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_rewrite_keeps_aggregated_text() {
        let audit = auditor(vec![text(r#"{"flagged_segments": [], "safe_output": "   "}"#)])
            .audit(&Model::default(), "Original text")
            .await
            .unwrap();
        assert_eq!(audit.safe_output, "Original text");
    }

    #[tokio::test]
    async fn test_gateway_error_is_returned() {
        let result = auditor(vec![Scripted::Error("down".to_string())])
            .audit(&Model::default(), "text")
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_combine_dedupes_flags() {
        let model_audit = AuditOutput {
            flagged_segments: vec!["percentage figure: \"80%\"".to_string()],
            revision_suggestions: vec![],
            safe_output: String::new(),
        };
        let combined = combine_audit(
            model_audit,
            vec!["Percentage  figure: \"80%\"".to_string()],
            "80% of people",
        );
        assert_eq!(combined.flagged_segments.len(), 1);
        assert_eq!(combined.safe_output, "80% of people");
    }

    #[test]
    fn test_combine_drops_blank_flags() {
        let model_audit = AuditOutput {
            flagged_segments: vec!["first".to_string(), "  ".to_string(), "second".to_string()],
            revision_suggestions: vec![],
            safe_output: "ok".to_string(),
        };
        let combined = combine_audit(model_audit, vec![String::new()], "ok");
        assert_eq!(combined.flagged_segments, vec!["first", "second"]);
    }
}
