//! Model session response types.
//!
//! - [`response::LlmResponse`]: a structured completion (text and tool use)
//! - [`response::ContentBlock`]: one block of a completion
//! - [`response::StopReason`]: why the model stopped

pub mod response;
