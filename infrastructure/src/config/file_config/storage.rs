//! File locations from TOML (`[search]`, `[session]` and `[logging]` sections)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Reddit listing JSON the keyword index is built from
    pub data_path: String,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            data_path: "data/reddit_threads.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// JSON file sessions persist to; in-memory only when unset
    pub store_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file for conversation events
    pub conversation_log: Option<String>,
}
