//! Typed rejection reasons for projects actions.

use thiserror::Error;

/// Deliberately small: status transitions are unconditional, so only
/// id-level preconditions can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectsError {
    #[error("project '{id}' already exists")]
    DuplicateProject { id: String },
    #[error("project '{id}' not found")]
    ProjectNotFound { id: String },
}
