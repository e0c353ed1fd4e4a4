//! Action union and creators for the inbox document.

use crate::inbox::state::ThreadParty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStakeholderInput {
    pub id: String,
    pub name: String,
    pub eth_address: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStakeholderInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub eth_address: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStakeholderInput {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveStakeholderInput {
    pub id: String,
    /// Sibling to land in front of; absent or unresolvable means append.
    #[serde(default)]
    pub insert_before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThreadInput {
    pub id: String,
    pub stakeholder: String,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddThreadMessageInput {
    pub thread_id: String,
    pub message_id: String,
    pub author: ThreadParty,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposeThreadResolvedInput {
    pub thread_id: String,
    pub proposed_by: ThreadParty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmThreadResolvedInput {
    pub thread_id: String,
    pub confirmed_by: ThreadParty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadIdInput {
    pub thread_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InboxAction {
    AddStakeholder(AddStakeholderInput),
    UpdateStakeholder(UpdateStakeholderInput),
    RemoveStakeholder(RemoveStakeholderInput),
    MoveStakeholder(MoveStakeholderInput),
    CreateThread(CreateThreadInput),
    AddThreadMessage(AddThreadMessageInput),
    ProposeThreadResolved(ProposeThreadResolvedInput),
    ConfirmThreadResolved(ConfirmThreadResolvedInput),
    ArchiveThread(ThreadIdInput),
    ReopenThread(ThreadIdInput),
}

impl InboxAction {
    pub fn add_stakeholder(
        id: impl Into<String>,
        name: impl Into<String>,
        eth_address: impl Into<String>,
    ) -> Self {
        InboxAction::AddStakeholder(AddStakeholderInput {
            id: id.into(),
            name: name.into(),
            eth_address: eth_address.into(),
            avatar: None,
        })
    }

    pub fn remove_stakeholder(id: impl Into<String>) -> Self {
        InboxAction::RemoveStakeholder(RemoveStakeholderInput { id: id.into() })
    }

    pub fn move_stakeholder(id: impl Into<String>, insert_before: Option<&str>) -> Self {
        InboxAction::MoveStakeholder(MoveStakeholderInput {
            id: id.into(),
            insert_before: insert_before.map(str::to_string),
        })
    }

    pub fn create_thread(
        id: impl Into<String>,
        stakeholder: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        InboxAction::CreateThread(CreateThreadInput {
            id: id.into(),
            stakeholder: stakeholder.into(),
            topic: topic.into(),
        })
    }

    /// Append a thread message stamped with the current time.
    pub fn add_thread_message(
        thread_id: impl Into<String>,
        message_id: impl Into<String>,
        author: ThreadParty,
        content: impl Into<String>,
    ) -> Self {
        InboxAction::AddThreadMessage(AddThreadMessageInput {
            thread_id: thread_id.into(),
            message_id: message_id.into(),
            author,
            content: content.into(),
            timestamp: Utc::now(),
        })
    }

    pub fn propose_thread_resolved(thread_id: impl Into<String>, proposed_by: ThreadParty) -> Self {
        InboxAction::ProposeThreadResolved(ProposeThreadResolvedInput {
            thread_id: thread_id.into(),
            proposed_by,
        })
    }

    pub fn confirm_thread_resolved(
        thread_id: impl Into<String>,
        confirmed_by: ThreadParty,
    ) -> Self {
        InboxAction::ConfirmThreadResolved(ConfirmThreadResolvedInput {
            thread_id: thread_id.into(),
            confirmed_by,
        })
    }

    pub fn archive_thread(thread_id: impl Into<String>) -> Self {
        InboxAction::ArchiveThread(ThreadIdInput {
            thread_id: thread_id.into(),
        })
    }

    pub fn reopen_thread(thread_id: impl Into<String>) -> Self {
        InboxAction::ReopenThread(ThreadIdInput {
            thread_id: thread_id.into(),
        })
    }
}
