//! Interactive chat module
//!
//! Provides a reedline-based interactive chat interface over one session.

mod repl;

pub use repl::{ChatCommand, ChatRepl};
