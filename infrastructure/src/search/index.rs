//! Keyword search index over a Reddit listing export
//!
//! The listing is read once at startup; the index is immutable afterwards
//! and shared across requests behind an `Arc`.

use council_application::ports::search::SearchPort;
use council_domain::search::rank;
use council_domain::{SearchDocument, SearchHit};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SearchIndexError {
    #[error("Failed to read search data {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid Reddit listing: {0}")]
    InvalidListing(#[from] serde_json::Error),
}

// Missing `data` keys read as empty: no posts, or one blank post.
#[derive(Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    #[serde(default)]
    data: Post,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct Post {
    title: String,
    selftext: String,
    url: String,
    ups: i64,
    num_comments: i64,
}

impl From<Post> for SearchDocument {
    fn from(post: Post) -> Self {
        SearchDocument {
            title: post.title,
            selftext: post.selftext,
            url: post.url,
            ups: post.ups.max(0) as u64,
            comments: post.num_comments.max(0) as u64,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeywordSearchIndex {
    documents: Vec<SearchDocument>,
}

impl KeywordSearchIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(documents: Vec<SearchDocument>) -> Self {
        Self { documents }
    }

    /// Load a listing file. A missing file yields an empty index.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SearchIndexError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "Search data {} not found; thread search will return nothing",
                path.display()
            );
            return Ok(Self::empty());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| SearchIndexError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let index = Self::from_listing(&raw)?;
        info!(
            "Loaded {} threads from {}",
            index.documents.len(),
            path.display()
        );
        Ok(index)
    }

    /// Parse `data.children[].data` posts from a listing JSON string
    pub fn from_listing(raw: &str) -> Result<Self, SearchIndexError> {
        let listing: Listing = serde_json::from_str(raw)?;
        let documents = listing
            .data
            .children
            .into_iter()
            .map(|child| SearchDocument::from(child.data))
            .collect();
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[SearchDocument] {
        &self.documents
    }
}

impl SearchPort for KeywordSearchIndex {
    fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        rank(&self.documents, query, limit)
    }

    fn document_count(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"kind": "t3", "data": {"title": "PMDD rage before my period", "selftext": "The rage is unreal", "url": "https://reddit.com/r/PMDD/a", "ups": 40, "num_comments": 12}},
                {"kind": "t3", "data": {"title": "Sleep tips", "selftext": "Insomnia in the luteal phase", "url": "https://reddit.com/r/PMDD/b", "ups": 3, "num_comments": 1}},
                {"kind": "t3", "data": {"title": "No engagement fields", "url": "https://reddit.com/r/PMDD/c"}}
            ]
        }
    }"#;

    #[test]
    fn test_from_listing() {
        let index = KeywordSearchIndex::from_listing(LISTING).unwrap();
        assert_eq!(index.document_count(), 3);
        assert_eq!(index.documents()[0].ups, 40);
        assert_eq!(index.documents()[2].comments, 0);
        assert_eq!(index.documents()[2].selftext, "");
    }

    #[test]
    fn test_search_ranks_matching_threads() {
        let index = KeywordSearchIndex::from_listing(LISTING).unwrap();
        let hits = index.search("rage", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].url, "https://reddit.com/r/PMDD/a");
        assert!(hits[0].score > 2.0);

        assert!(index.search("   ", 5).is_empty());
        assert!(index.search("migraine", 5).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = KeywordSearchIndex::load(dir.path().join("absent.json")).unwrap();
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pmdd.json");
        std::fs::write(&path, LISTING).unwrap();
        let index = KeywordSearchIndex::load(&path).unwrap();
        assert_eq!(index.search("insomnia luteal", 5).len(), 1);
    }

    #[test]
    fn test_listing_without_data_is_empty() {
        let index = KeywordSearchIndex::from_listing("{}").unwrap();
        assert_eq!(index.document_count(), 0);

        let index = KeywordSearchIndex::from_listing(r#"{"data": {}}"#).unwrap();
        assert_eq!(index.document_count(), 0);
    }

    #[test]
    fn test_child_without_data_is_blank_post() {
        let index =
            KeywordSearchIndex::from_listing(r#"{"data": {"children": [{"kind": "t3"}]}}"#).unwrap();
        assert_eq!(index.document_count(), 1);
        assert_eq!(index.documents()[0].title, "");
        assert!(index.search("anything", 5).is_empty());
    }

    #[test]
    fn test_invalid_listing() {
        assert!(matches!(
            KeywordSearchIndex::from_listing(r#"{"data": 3}"#),
            Err(SearchIndexError::InvalidListing(_))
        ));
    }
}
