//! Infrastructure layer for symptom-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod search;
pub mod session;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileModelsConfig,
    FileOrchestrationConfig, FileProviderConfig, FileSearchConfig, FileSessionConfig,
};
pub use logging::JsonlConversationLogger;
pub use providers::{ConfigError, DEFAULT_API_KEY_ENV, OpenAiGateway, resolve_api_key};
pub use search::{KeywordSearchIndex, SearchIndexError};
pub use session::InMemorySessionStore;
pub use tools::{SEARCH_SUBREDDIT, SubredditSearchTool};
