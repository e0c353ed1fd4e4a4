//! State types for the inbox document.

use crate::document::DocumentModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Party on either side of a thread (message author, proposer, confirmer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreadParty {
    Agent,
    Stakeholder,
}

impl ThreadParty {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreadParty::Agent => "agent",
            ThreadParty::Stakeholder => "stakeholder",
        }
    }
}

/// Resolution workflow position of a thread.
///
/// Either party may propose resolution; confirmation moves the thread to
/// `ConfirmedResolved` from either proposed state. Archived threads sit
/// outside the workflow until reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadStatus {
    Open,
    ProposedResolvedByAgent,
    ProposedResolvedByStakeholder,
    ConfirmedResolved,
    Archived,
}

impl ThreadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreadStatus::Open => "open",
            ThreadStatus::ProposedResolvedByAgent => "proposed-resolved-by-agent",
            ThreadStatus::ProposedResolvedByStakeholder => "proposed-resolved-by-stakeholder",
            ThreadStatus::ConfirmedResolved => "confirmed-resolved",
            ThreadStatus::Archived => "archived",
        }
    }

    pub fn is_proposed(self) -> bool {
        matches!(
            self,
            ThreadStatus::ProposedResolvedByAgent | ThreadStatus::ProposedResolvedByStakeholder
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub id: String,
    pub name: String,
    pub eth_address: String,
    pub avatar: Option<String>,
    /// Soft-delete flag; removed stakeholders stay in the list.
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadMessage {
    pub id: String,
    pub author: ThreadParty,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    /// Id of the stakeholder this thread belongs to.
    pub stakeholder: String,
    pub topic: String,
    pub status: ThreadStatus,
    pub messages: Vec<ThreadMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxState {
    pub stakeholders: Vec<Stakeholder>,
    pub threads: Vec<Thread>,
}

impl InboxState {
    pub fn find_stakeholder(&self, id: &str) -> Option<&Stakeholder> {
        self.stakeholders.iter().find(|s| s.id == id)
    }

    pub fn find_stakeholder_mut(&mut self, id: &str) -> Option<&mut Stakeholder> {
        self.stakeholders.iter_mut().find(|s| s.id == id)
    }

    pub fn find_thread(&self, id: &str) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn find_thread_mut(&mut self, id: &str) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|t| t.id == id)
    }
}

impl DocumentModel for InboxState {
    type Action = crate::inbox::actions::InboxAction;
    type Error = crate::inbox::error::InboxError;

    const DOCUMENT_TYPE: &'static str = "inbox";

    fn reduce(state: &mut Self, action: &Self::Action) -> Result<(), Self::Error> {
        crate::inbox::reducer::reduce(state, action)
    }

    fn invariants(state: &Self) -> Vec<String> {
        crate::inbox::invariants::validate(state)
    }
}
