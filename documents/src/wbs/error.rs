//! Typed rejection reasons for wbs actions.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WbsError {
    #[error("goal '{id}' already exists")]
    DuplicateGoalId { id: String },
    #[error("goal '{id}' not found")]
    GoalNotFound { id: String },
}
