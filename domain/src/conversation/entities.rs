//! Conversation entities

use serde::{Deserialize, Serialize};

/// Number of most recent turns sent to any node
pub const HISTORY_WINDOW: usize = 8;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of a conversation (Entity)
///
/// Turns are immutable once appended to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The most recent `size` turns, oldest first
pub fn window(history: &[ConversationTurn], size: usize) -> &[ConversationTurn] {
    let start = history.len().saturating_sub(size);
    &history[start..]
}

/// Render turns as `role: content` lines for a prompt body
pub fn render_history(turns: &[ConversationTurn]) -> String {
    if turns.is_empty() {
        return "(no earlier conversation)".to_string();
    }
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.as_str(), t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ConversationTurn::user(format!("u{i}"))
                } else {
                    ConversationTurn::assistant(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_keeps_most_recent() {
        let history = turns(11);
        let recent = window(&history, HISTORY_WINDOW);
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0].content, "a3");
        assert_eq!(recent[7].content, "u10");
    }

    #[test]
    fn test_window_shorter_than_size() {
        let history = turns(3);
        assert_eq!(window(&history, HISTORY_WINDOW).len(), 3);
        assert!(window(&[], HISTORY_WINDOW).is_empty());
    }

    #[test]
    fn test_render_history() {
        let history = vec![
            ConversationTurn::user("I feel bloated"),
            ConversationTurn::assistant("Tell me more"),
        ];
        assert_eq!(
            render_history(&history),
            "user: I feel bloated\nassistant: Tell me more"
        );
        assert_eq!(render_history(&[]), "(no earlier conversation)");
    }
}
