//! Conversation domain
//!
//! Turns exchanged between the user and the assistant, and the per-session
//! journal records an external session store keeps alongside them.

pub mod entities;
pub mod journal;

pub use entities::{ConversationTurn, HISTORY_WINDOW, Role, render_history, window};
pub use journal::{AuditLogEntry, SaveBucket, SavedItem, SessionSnapshot};
