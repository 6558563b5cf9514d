//! Tool executors handed to nodes

mod subreddit_search;

pub use subreddit_search::{SEARCH_SUBREDDIT, SubredditSearchTool, search_subreddit_definition};
