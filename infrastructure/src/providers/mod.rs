//! Text-generation providers and their credentials

pub mod api_key;
pub mod openai;

pub use api_key::{ConfigError, DEFAULT_API_KEY_ENV, resolve_api_key};
pub use openai::OpenAiGateway;
