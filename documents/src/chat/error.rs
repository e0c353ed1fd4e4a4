//! Typed rejection reasons for chat actions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message '{id}' already exists")]
    DuplicateMessage { id: String },
    #[error("message '{id}' not found")]
    MessageNotFound { id: String },
}
