//! API key resolution
//!
//! Sources, first match wins: the environment variable, the same key in a
//! `.env` file at the project root, then a bare `secret-key.txt` file.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
const DOTENV_FILE: &str = ".env";
const SECRET_FILE: &str = "secret-key.txt";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "API key is missing. Set {0}, add {0} to .env, or place the key in secret-key.txt."
    )]
    MissingApiKey(String),
}

/// Resolve the key named `env_var`, looking for files under `project_root`.
pub fn resolve_api_key(env_var: &str, project_root: &Path) -> Result<String, ConfigError> {
    resolve_with_env(std::env::var(env_var).ok(), env_var, project_root)
}

fn resolve_with_env(
    env_value: Option<String>,
    env_var: &str,
    project_root: &Path,
) -> Result<String, ConfigError> {
    if let Some(key) = non_blank(env_value) {
        debug!("API key taken from ${}", env_var);
        return Ok(key);
    }

    if let Some(key) = non_blank(from_dotenv(&project_root.join(DOTENV_FILE), env_var)) {
        debug!("API key taken from {}", DOTENV_FILE);
        return Ok(key);
    }

    let secret = std::fs::read_to_string(project_root.join(SECRET_FILE)).ok();
    if let Some(key) = non_blank(secret) {
        debug!("API key taken from {}", SECRET_FILE);
        return Ok(key);
    }

    Err(ConfigError::MissingApiKey(env_var.to_string()))
}

/// Load `path` into the process environment, then read `env_var`.
///
/// Variables already set are not overridden by the file.
fn from_dotenv(path: &Path, env_var: &str) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    if let Err(e) = dotenv::from_path(path) {
        warn!("Failed to load {}: {}", path.display(), e);
        return None;
    }
    std::env::var(env_var).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|v| !v.is_empty())
}
