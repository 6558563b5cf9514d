//! Application layer for symptom-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestrationParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, ToolResultMessage},
    progress::{NoProgress, OrchestrationProgress},
    search::SearchPort,
    session_store::{SessionStoreError, SessionStorePort},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::audit::{SafetyAuditor, combine_audit};
pub use use_cases::invoke_node::NodeInvoker;
pub use use_cases::leader::LeaderProtocol;
pub use use_cases::run_orchestration::{
    RunOrchestrationError, RunOrchestrationInput, RunOrchestrationUseCase,
};
pub use use_cases::run_session_turn::{
    RunSessionTurnError, RunSessionTurnInput, RunSessionTurnUseCase,
};
pub use use_cases::supporting::{SupportingContext, SupportingNodeSet};
