//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod models;
mod orchestration;
mod provider;
mod storage;

pub use models::FileModelsConfig;
pub use orchestration::FileOrchestrationConfig;
pub use provider::FileProviderConfig;
pub use storage::{FileLoggingConfig, FileSearchConfig, FileSessionConfig};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("provider.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("orchestration.max_concurrency cannot be 0")]
    InvalidConcurrency,

    #[error("models.default cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub models: FileModelsConfig,
    pub orchestration: FileOrchestrationConfig,
    pub provider: FileProviderConfig,
    pub search: FileSearchConfig,
    pub session: FileSessionConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.provider.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.orchestration.max_concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        if self.models.default.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::Model;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[models]
default = "gpt-4.1-mini"

[orchestration]
history_window = 4
max_concurrency = 2
max_tool_turns = 1
search_limit = 3

[provider]
base_url = "http://localhost:8080/v1"
api_key_env = "LOCAL_KEY"
timeout_seconds = 15

[search]
data_path = "fixtures/pmdd.json"

[session]
store_path = "sessions.json"

[logging]
conversation_log = "council.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.models.default_model(), Model::Gpt41Mini);
        assert_eq!(config.orchestration.history_window, 4);
        assert_eq!(config.orchestration.to_params().max_concurrency, 2);
        assert_eq!(config.provider.base_url, "http://localhost:8080/v1");
        assert_eq!(config.provider.timeout_seconds, 15);
        assert_eq!(config.search.data_path, "fixtures/pmdd.json");
        assert_eq!(config.session.store_path.as_deref(), Some("sessions.json"));
        assert_eq!(
            config.logging.conversation_log.as_deref(),
            Some("council.jsonl")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[orchestration]
max_concurrency = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.orchestration.max_concurrency, 1);
        assert_eq!(config.orchestration.history_window, 8);
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(config.session.store_path.is_none());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config: FileConfig = toml::from_str("[provider]\ntimeout_seconds = 0").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config: FileConfig = toml::from_str("[orchestration]\nmax_concurrency = 0").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidConcurrency)
        );
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let config: FileConfig = toml::from_str("[models]\ndefault = \"  \"").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }
}
