//! OpenAI-compatible Chat Completions provider

mod gateway;
mod session;
mod types;

pub use gateway::OpenAiGateway;
pub use session::{OpenAiSession, TEMPERATURE};
