//! Keyword search domain
//!
//! Pure ranking over an in-memory document set. Loading documents is the
//! infrastructure layer's job.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weight of the engagement bonus relative to term frequency
pub const ENGAGEMENT_WEIGHT: f64 = 0.3;

/// A searchable community thread
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub title: String,
    pub selftext: String,
    pub url: String,
    pub ups: u64,
    pub comments: u64,
}

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub score: f64,
    pub ups: u64,
    pub comments: u64,
}

/// Lowercase, replace anything outside `[a-z0-9]` and whitespace with a
/// space, split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Rank `documents` against `query`.
///
/// The base score is the summed frequency of each query token in the
/// document's title and body; documents scoring zero are skipped. The final
/// score adds `0.3 * (ln(ups + 1) + ln(comments + 1))` and is rounded to
/// three decimals. Results are sorted by score, highest first, and
/// truncated to `limit`.
pub fn rank(documents: &[SearchDocument], query: &str, limit: usize) -> Vec<SearchHit> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = documents
        .iter()
        .filter_map(|doc| {
            let mut frequencies: HashMap<String, usize> = HashMap::new();
            for token in tokenize(&format!("{} {}", doc.title, doc.selftext)) {
                *frequencies.entry(token).or_insert(0) += 1;
            }
            let base: usize = query_tokens
                .iter()
                .map(|t| frequencies.get(t).copied().unwrap_or(0))
                .sum();
            if base == 0 {
                return None;
            }

            let engagement = ((doc.ups as f64) + 1.0).ln() + ((doc.comments as f64) + 1.0).ln();
            let score = round3(base as f64 + ENGAGEMENT_WEIGHT * engagement);
            Some(SearchHit {
                title: doc.title.clone(),
                url: doc.url.clone(),
                score,
                ups: doc.ups,
                comments: doc.comments,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(limit);
    hits
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Render hits as the numbered listing handed back to the model.
pub fn format_candidate_threads(hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return "No matching local Reddit threads found.".to_string();
    }
    let mut lines = vec!["Candidate threads:".to_string()];
    for (i, hit) in hits.iter().enumerate() {
        lines.push(format!("{}. {} ({}) score={}", i + 1, hit.title, hit.url, hit.score));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str, selftext: &str, ups: u64, comments: u64) -> SearchDocument {
        SearchDocument {
            title: title.to_string(),
            selftext: selftext.to_string(),
            url: format!("https://reddit.com/{}", title.len()),
            ups,
            comments,
        }
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("PMDD-rage, day 21!\tIt's bad"),
            vec!["pmdd", "rage", "day", "21", "it", "s", "bad"]
        );
        assert!(tokenize("?!").is_empty());
    }

    #[test]
    fn test_rank_by_term_frequency() {
        let docs = vec![
            doc("Cramps", "cramps cramps", 0, 0),
            doc("Sleep", "insomnia", 0, 0),
            doc("Cramps and fatigue", "", 0, 0),
        ];
        let hits = rank(&docs, "cramps", 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Cramps");
        assert_eq!(hits[0].score, 3.0);
        assert_eq!(hits[1].score, 1.0);
    }

    #[test]
    fn test_engagement_bonus_and_rounding() {
        let docs = vec![doc("rage", "", 99, 0)];
        let hits = rank(&docs, "rage", 5);
        // 1 + 0.3 * ln(100)
        assert_eq!(hits[0].score, 2.382);
    }

    #[test]
    fn test_engagement_breaks_ties() {
        let docs = vec![doc("rage a", "", 0, 0), doc("rage b", "", 10, 10)];
        let hits = rank(&docs, "rage", 5);
        assert_eq!(hits[0].title, "rage b");
    }

    #[test]
    fn test_limit_and_blank_query() {
        let docs: Vec<_> = (0..10).map(|i| doc(&format!("pmdd {i}"), "", 0, 0)).collect();
        assert_eq!(rank(&docs, "pmdd", 3).len(), 3);
        assert!(rank(&docs, "   ", 3).is_empty());
        assert!(rank(&docs, "pmdd", 0).is_empty());
    }

    #[test]
    fn test_format_candidate_threads() {
        assert_eq!(format_candidate_threads(&[]), "No matching local Reddit threads found.");
        let hits = vec![SearchHit {
            title: "Luteal rage".to_string(),
            url: "https://r/1".to_string(),
            score: 2.5,
            ups: 3,
            comments: 1,
        }];
        assert_eq!(
            format_candidate_threads(&hits),
            "Candidate threads:\n1. Luteal rage (https://r/1) score=2.5"
        );
    }
}
