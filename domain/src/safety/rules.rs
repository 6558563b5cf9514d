use regex::Regex;
use std::sync::LazyLock;

/// Constraints every audited response must satisfy
pub const AUDIT_CONSTRAINTS: [&str; 4] = [
    "No diagnosis: never state or imply that the user has a specific condition.",
    "No treatment prescription: never tell the user to take, stop or change a medication or dose.",
    "No probabilistic certainty: no percentages, odds or guarantees about outcomes.",
    "No alarmist framing: keep a calm, supportive tone and suggest professional care where relevant.",
];

/// `(label, pattern)` pairs, checked in this order. All are case-insensitive.
pub const RULE_PATTERNS: [(&str, &str); 4] = [
    (
        "diagnostic certainty",
        r"(?i)\b(?:you\s+(?:definitely|certainly|clearly|obviously)\s+have|you\s+have\s+been\s+diagnosed\s+with|this\s+is\s+(?:definitely|certainly|clearly)|you\s+are\s+suffering\s+from)\b",
    ),
    (
        "cure or guarantee claim",
        r"(?i)\b(?:cures?|cured|guaranteed?|miracle\s+treatment)\b",
    ),
    ("percentage figure", r"(?i)\b\d+(?:\.\d+)?\s?(?:%|percent\b)"),
    (
        "treatment directive",
        r"(?i)\b(?:you\s+(?:should|must|need\s+to)\s+(?:take|stop\s+taking|start\s+taking|increase|decrease)|take\s+\d+\s*(?:mg|milligrams|pills|tablets))\b",
    ),
];

/// A compiled safety pattern
#[derive(Debug)]
pub struct SafetyRule {
    pub label: &'static str,
    pattern: Regex,
}

impl SafetyRule {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

static RULES: LazyLock<Vec<SafetyRule>> = LazyLock::new(|| {
    RULE_PATTERNS
        .iter()
        .filter_map(|(label, pattern)| {
            Regex::new(pattern).ok().map(|pattern| SafetyRule { label, pattern })
        })
        .collect()
});

/// Deterministic rule scan over response text.
///
/// # Examples
///
/// ```
/// use council_domain::safety::RuleScanner;
///
/// let flags = RuleScanner.scan("This supplement cures cramps.");
/// assert_eq!(flags, vec![r#"cure or guarantee claim: "cures""#.to_string()]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleScanner;

impl RuleScanner {
    pub fn rules(&self) -> &'static [SafetyRule] {
        &RULES
    }

    /// One flag per match, in rule order then text order, formatted as
    /// `label: "matched text"`.
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.rules()
            .iter()
            .flat_map(|rule| {
                rule.pattern
                    .find_iter(text)
                    .map(move |m| format!("{}: \"{}\"", rule.label, m.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for (label, pattern) in RULE_PATTERNS {
            assert!(Regex::new(pattern).is_ok(), "pattern for {label} must compile");
        }
        assert_eq!(RuleScanner.rules().len(), RULE_PATTERNS.len());
    }

    #[test]
    fn test_clean_text_has_no_flags() {
        let text = "It might help to keep a symptom journal and share it with a doctor.";
        assert!(RuleScanner.scan(text).is_empty());
    }

    #[test]
    fn test_each_category() {
        assert_eq!(
            RuleScanner.scan("You definitely have PMDD."),
            vec![r#"diagnostic certainty: "You definitely have""#]
        );
        assert_eq!(
            RuleScanner.scan("It is GUARANTEED to work"),
            vec![r#"cure or guarantee claim: "GUARANTEED""#]
        );
        assert_eq!(
            RuleScanner.scan("about 80% of people"),
            vec![r#"percentage figure: "80%""#]
        );
        assert_eq!(
            RuleScanner.scan("You should take ibuprofen."),
            vec![r#"treatment directive: "You should take""#]
        );
    }

    #[test]
    fn test_flags_follow_rule_order() {
        let text = "Take 400 mg daily; this cures it in 90% of cases. You are suffering from PMDD.";
        let flags = RuleScanner.scan(text);
        assert_eq!(
            flags,
            vec![
                r#"diagnostic certainty: "You are suffering from""#,
                r#"cure or guarantee claim: "cures""#,
                r#"percentage figure: "90%""#,
                r#"treatment directive: "Take 400 mg""#,
            ]
        );
    }

    #[test]
    fn test_repeated_matches_each_flagged() {
        let flags = RuleScanner.scan("10% here and 20 % there");
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[1], r#"percentage figure: "20 %""#);
    }

    #[test]
    fn test_percentage_forms() {
        assert_eq!(
            RuleScanner.scan("I'm 1000% sure"),
            vec![r#"percentage figure: "1000%""#]
        );
        assert_eq!(
            RuleScanner.scan("50 percent of people"),
            vec![r#"percentage figure: "50 percent""#]
        );
        assert_eq!(
            RuleScanner.scan("12.5 Percent"),
            vec![r#"percentage figure: "12.5 Percent""#]
        );
        assert!(RuleScanner.scan("50 percentile").is_empty());
    }
}
