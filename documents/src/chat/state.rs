//! State types for the chat document.

use crate::document::DocumentModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Party that authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChatSender {
    User,
    Agent,
}

impl ChatSender {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatSender::User => "user",
            ChatSender::Agent => "agent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// One conversation with the agent, messages in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatState {
    pub title: String,
    pub messages: Vec<ChatMessage>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            title: "Agent chat".to_string(),
            messages: Vec::new(),
        }
    }
}

impl ChatState {
    pub fn find_message_mut(&mut self, id: &str) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}

impl DocumentModel for ChatState {
    type Action = crate::chat::actions::ChatAction;
    type Error = crate::chat::error::ChatError;

    const DOCUMENT_TYPE: &'static str = "chat";

    fn reduce(state: &mut Self, action: &Self::Action) -> Result<(), Self::Error> {
        crate::chat::reducer::reduce(state, action)
    }

    fn invariants(state: &Self) -> Vec<String> {
        crate::chat::invariants::validate(state)
    }
}
