//! Model selection from TOML (`[models]` section)

use council_domain::Model;
use serde::{Deserialize, Serialize};

/// Raw model configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model every node is invoked with
    pub default: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            default: Model::default().to_string(),
        }
    }
}

impl FileModelsConfig {
    pub fn default_model(&self) -> Model {
        Model::from(self.default.trim())
    }
}
