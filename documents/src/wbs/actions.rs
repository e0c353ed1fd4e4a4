//! Action union and creators for the wbs document.

use crate::wbs::state::GoalStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddGoalInput {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    /// Sibling in the flat list to land in front of; absent or
    /// unresolvable means append.
    #[serde(default)]
    pub insert_before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalInput {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGoalParentInput {
    pub id: String,
    /// `None` moves the goal to the top level.
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetGoalStatusInput {
    pub id: String,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveGoalInput {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveGoalInput {
    pub id: String,
    #[serde(default)]
    pub insert_before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WbsAction {
    AddGoal(AddGoalInput),
    UpdateGoal(UpdateGoalInput),
    SetGoalParent(SetGoalParentInput),
    SetGoalStatus(SetGoalStatusInput),
    RemoveGoal(RemoveGoalInput),
    MoveGoal(MoveGoalInput),
}

impl WbsAction {
    pub fn add_goal(id: impl Into<String>, description: impl Into<String>) -> Self {
        WbsAction::AddGoal(AddGoalInput {
            id: id.into(),
            description: description.into(),
            parent_id: None,
            dependencies: Vec::new(),
            notes: None,
            assignee: None,
            insert_before: None,
        })
    }

    pub fn add_child_goal(
        id: impl Into<String>,
        parent_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        WbsAction::AddGoal(AddGoalInput {
            id: id.into(),
            description: description.into(),
            parent_id: Some(parent_id.into()),
            dependencies: Vec::new(),
            notes: None,
            assignee: None,
            insert_before: None,
        })
    }

    pub fn set_goal_parent(id: impl Into<String>, parent_id: Option<&str>) -> Self {
        WbsAction::SetGoalParent(SetGoalParentInput {
            id: id.into(),
            parent_id: parent_id.map(str::to_string),
        })
    }

    pub fn set_goal_status(id: impl Into<String>, status: GoalStatus) -> Self {
        WbsAction::SetGoalStatus(SetGoalStatusInput {
            id: id.into(),
            status,
        })
    }

    pub fn remove_goal(id: impl Into<String>) -> Self {
        WbsAction::RemoveGoal(RemoveGoalInput { id: id.into() })
    }

    pub fn move_goal(id: impl Into<String>, insert_before: Option<&str>) -> Self {
        WbsAction::MoveGoal(MoveGoalInput {
            id: id.into(),
            insert_before: insert_before.map(str::to_string),
        })
    }
}
