//! Search port
//!
//! Read-only keyword search over the local community thread set.

use council_domain::SearchHit;

/// Port for ranked keyword search.
///
/// The document set is loaded once at startup and never mutated, so
/// implementations are shared freely across requests.
pub trait SearchPort: Send + Sync {
    /// Ranked hits for `query`, at most `limit` of them. A blank query
    /// returns nothing.
    fn search(&self, query: &str, limit: usize) -> Vec<SearchHit>;

    /// Number of searchable documents
    fn document_count(&self) -> usize;
}
