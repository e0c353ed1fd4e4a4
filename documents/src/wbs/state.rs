//! State types for the wbs document.

use crate::document::DocumentModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    Todo,
    InProgress,
    Delegated,
    WontDo,
    Blocked,
    Completed,
}

impl GoalStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalStatus::Todo => "todo",
            GoalStatus::InProgress => "in-progress",
            GoalStatus::Delegated => "delegated",
            GoalStatus::WontDo => "wont-do",
            GoalStatus::Blocked => "blocked",
            GoalStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub description: String,
    pub status: GoalStatus,
    /// Id of the parent goal; `None` for top-level goals.
    pub parent_id: Option<String>,
    /// Ids of goals this one depends on.
    pub dependencies: Vec<String>,
    pub notes: Option<String>,
    pub assignee: Option<String>,
    /// Soft-delete flag; removal cascades to descendants.
    pub removed: bool,
}

/// Flat list in document order; the tree is implied by `parentId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WbsState {
    pub goals: Vec<Goal>,
}

impl WbsState {
    pub fn find_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn find_goal_mut(&mut self, id: &str) -> Option<&mut Goal> {
        self.goals.iter_mut().find(|g| g.id == id)
    }

    /// Children of `parent_id` (`None` for top-level goals), in list order.
    pub fn children_of(&self, parent_id: Option<&str>) -> Vec<&Goal> {
        self.goals
            .iter()
            .filter(|g| g.parent_id.as_deref() == parent_id)
            .collect()
    }
}

impl DocumentModel for WbsState {
    type Action = crate::wbs::actions::WbsAction;
    type Error = crate::wbs::error::WbsError;

    const DOCUMENT_TYPE: &'static str = "wbs";

    fn reduce(state: &mut Self, action: &Self::Action) -> Result<(), Self::Error> {
        crate::wbs::reducer::reduce(state, action)
    }

    fn invariants(state: &Self) -> Vec<String> {
        crate::wbs::invariants::validate(state)
    }
}
