//! Typed rejection reasons for inbox actions.

use crate::inbox::state::ThreadStatus;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InboxError {
    #[error("stakeholder '{id}' already exists")]
    DuplicateStakeholder { id: String },
    #[error("stakeholder '{id}' not found")]
    StakeholderNotFound { id: String },
    #[error("thread '{id}' already exists")]
    DuplicateThread { id: String },
    #[error("thread '{id}' not found")]
    ThreadNotFound { id: String },
    #[error("message '{id}' already exists in thread '{thread_id}'")]
    DuplicateMessage { thread_id: String, id: String },
    #[error("thread '{id}' cannot be confirmed from status '{}'", .status.as_str())]
    InvalidStatus { id: String, status: ThreadStatus },
}
