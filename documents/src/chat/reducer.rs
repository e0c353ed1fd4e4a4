//! Reducer for the chat document.

use crate::chat::actions::{AddMessageInput, ChatAction, SetTitleInput, UpdateMessageInput};
use crate::chat::error::ChatError;
use crate::chat::state::{ChatMessage, ChatState};

pub fn reduce(state: &mut ChatState, action: &ChatAction) -> Result<(), ChatError> {
    match action {
        ChatAction::AddMessage(input) => add_message(state, input),
        ChatAction::UpdateMessage(input) => update_message(state, input),
        ChatAction::SetTitle(input) => set_title(state, input),
    }
}

fn add_message(state: &mut ChatState, input: &AddMessageInput) -> Result<(), ChatError> {
    if state.messages.iter().any(|m| m.id == input.id) {
        return Err(ChatError::DuplicateMessage {
            id: input.id.clone(),
        });
    }

    state.messages.push(ChatMessage {
        id: input.id.clone(),
        sender: input.sender,
        content: input.content.clone(),
        timestamp: input.timestamp,
    });
    Ok(())
}

/// Replace the content of an existing message.
///
/// Agent responses stream in and get finalized by editing the same message,
/// so content replacement is unconditional once the id resolves.
fn update_message(state: &mut ChatState, input: &UpdateMessageInput) -> Result<(), ChatError> {
    let message = state
        .find_message_mut(&input.id)
        .ok_or_else(|| ChatError::MessageNotFound {
            id: input.id.clone(),
        })?;
    message.content = input.content.clone();
    Ok(())
}

fn set_title(state: &mut ChatState, input: &SetTitleInput) -> Result<(), ChatError> {
    state.title = input.title.clone();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::state::ChatSender;

    /// Messages append in arrival order.
    #[test]
    fn add_message_appends_in_order() {
        let mut state = ChatState::default();
        reduce(
            &mut state,
            &ChatAction::add_message("m1", ChatSender::User, "question"),
        )
        .expect("add m1");
        reduce(
            &mut state,
            &ChatAction::add_message("m2", ChatSender::Agent, "answer"),
        )
        .expect("add m2");

        let ids: Vec<&str> = state.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
        assert_eq!(state.messages[1].sender, ChatSender::Agent);
    }

    #[test]
    fn add_message_rejects_duplicate_id() {
        let mut state = ChatState::default();
        reduce(
            &mut state,
            &ChatAction::add_message("m1", ChatSender::User, "first"),
        )
        .expect("add m1");

        let err = reduce(
            &mut state,
            &ChatAction::add_message("m1", ChatSender::User, "again"),
        )
        .expect_err("duplicate id");
        assert_eq!(
            err,
            ChatError::DuplicateMessage {
                id: "m1".to_string()
            }
        );
        assert_eq!(state.messages.len(), 1);
        assert_eq!(state.messages[0].content, "first");
    }

    /// Update replaces content in place without reordering.
    #[test]
    fn update_message_edits_content_in_place() {
        let mut state = ChatState::default();
        reduce(
            &mut state,
            &ChatAction::add_message("m1", ChatSender::Agent, "partial"),
        )
        .expect("add m1");
        reduce(
            &mut state,
            &ChatAction::add_message("m2", ChatSender::User, "later"),
        )
        .expect("add m2");

        reduce(&mut state, &ChatAction::update_message("m1", "complete"))
            .expect("update m1");

        assert_eq!(state.messages[0].content, "complete");
        assert_eq!(state.messages[1].content, "later");
    }

    #[test]
    fn update_message_rejects_unknown_id() {
        let mut state = ChatState::default();
        let err = reduce(&mut state, &ChatAction::update_message("missing", "x"))
            .expect_err("unknown id");
        assert_eq!(
            err,
            ChatError::MessageNotFound {
                id: "missing".to_string()
            }
        );
    }

    #[test]
    fn set_title_replaces_default() {
        let mut state = ChatState::default();
        assert_eq!(state.title, "Agent chat");

        reduce(&mut state, &ChatAction::set_title("Deployment help"))
            .expect("set title");
        assert_eq!(state.title, "Deployment help");
    }
}
