//! Action union and creators for the chat document.
//!
//! Wire format is `{"type": "ADD_MESSAGE", "input": {...}}`; the creators
//! exist for callers that build actions in code rather than from JSON.

use crate::chat::state::ChatSender;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessageInput {
    pub id: String,
    pub sender: ChatSender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageInput {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTitleInput {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChatAction {
    AddMessage(AddMessageInput),
    UpdateMessage(UpdateMessageInput),
    SetTitle(SetTitleInput),
}

impl ChatAction {
    /// Append a message stamped with the current time.
    pub fn add_message(
        id: impl Into<String>,
        sender: ChatSender,
        content: impl Into<String>,
    ) -> Self {
        ChatAction::AddMessage(AddMessageInput {
            id: id.into(),
            sender,
            content: content.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn update_message(id: impl Into<String>, content: impl Into<String>) -> Self {
        ChatAction::UpdateMessage(UpdateMessageInput {
            id: id.into(),
            content: content.into(),
        })
    }

    pub fn set_title(title: impl Into<String>) -> Self {
        ChatAction::SetTitle(SetTitleInput {
            title: title.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Actions serialize to the tagged `{type, input}` wire shape.
    #[test]
    fn serializes_to_tagged_wire_shape() {
        let action = ChatAction::set_title("Roadmap review");
        let value = serde_json::to_value(&action).expect("serialize");
        assert_eq!(value["type"], "SET_TITLE");
        assert_eq!(value["input"]["title"], "Roadmap review");
    }

    #[test]
    fn deserializes_from_wire_json() {
        let action: ChatAction = serde_json::from_str(
            r#"{"type": "UPDATE_MESSAGE", "input": {"id": "m1", "content": "edited"}}"#,
        )
        .expect("deserialize");
        assert_eq!(
            action,
            ChatAction::UpdateMessage(UpdateMessageInput {
                id: "m1".to_string(),
                content: "edited".to_string(),
            })
        );
    }
}
