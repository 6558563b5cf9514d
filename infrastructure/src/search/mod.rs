//! Local community-thread search

mod index;

pub use index::{KeywordSearchIndex, SearchIndexError};
