//! Semantic invariants for the chat document.

use crate::chat::state::ChatState;
use std::collections::HashSet;

/// Check semantic invariants not expressible in JSON Schema:
/// - No duplicate message ids
///
/// Timestamps are caller-supplied and deliberately not policed: ADD_MESSAGE
/// accepts any stamp, so ordering is presentation, not an invariant.
pub fn validate(state: &ChatState) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for message in &state.messages {
        if !seen.insert(message.id.as_str()) {
            errors.push(format!("duplicate message id '{}'", message.id));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::state::{ChatMessage, ChatSender};
    use chrono::{Duration, Utc};

    fn message(id: &str, at_offset_secs: i64) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender: ChatSender::User,
            content: String::new(),
            timestamp: Utc::now() + Duration::seconds(at_offset_secs),
        }
    }

    #[test]
    fn default_state_is_valid() {
        assert!(validate(&ChatState::default()).is_empty());
    }

    #[test]
    fn flags_duplicate_ids() {
        let mut state = ChatState::default();
        state.messages = vec![message("m1", 0), message("m1", 5)];

        let errors = validate(&state);
        assert!(errors.iter().any(|e| e.contains("duplicate message id")));
    }

    /// Out-of-order timestamps are accepted input, not a violation.
    #[test]
    fn timestamp_regressions_are_not_flagged() {
        let mut state = ChatState::default();
        state.messages = vec![message("m1", 10), message("m2", 0)];

        assert!(validate(&state).is_empty());
    }
}
