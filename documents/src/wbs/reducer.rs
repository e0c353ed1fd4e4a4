//! Reducer for the wbs document.

use crate::wbs::actions::{
    AddGoalInput, MoveGoalInput, RemoveGoalInput, SetGoalParentInput, SetGoalStatusInput,
    UpdateGoalInput, WbsAction,
};
use crate::wbs::error::WbsError;
use crate::wbs::state::{Goal, GoalStatus, WbsState};
use std::collections::HashSet;

pub fn reduce(state: &mut WbsState, action: &WbsAction) -> Result<(), WbsError> {
    match action {
        WbsAction::AddGoal(input) => add_goal(state, input),
        WbsAction::UpdateGoal(input) => update_goal(state, input),
        WbsAction::SetGoalParent(input) => set_goal_parent(state, input),
        WbsAction::SetGoalStatus(input) => set_goal_status(state, input),
        WbsAction::RemoveGoal(input) => remove_goal(state, input),
        WbsAction::MoveGoal(input) => move_goal(state, input),
    }
}

fn require_goal(state: &WbsState, id: &str) -> Result<(), WbsError> {
    if state.find_goal(id).is_none() {
        return Err(WbsError::GoalNotFound { id: id.to_string() });
    }
    Ok(())
}

fn add_goal(state: &mut WbsState, input: &AddGoalInput) -> Result<(), WbsError> {
    if state.find_goal(&input.id).is_some() {
        return Err(WbsError::DuplicateGoalId {
            id: input.id.clone(),
        });
    }
    if let Some(parent_id) = &input.parent_id {
        require_goal(state, parent_id)?;
    }
    for dependency in &input.dependencies {
        require_goal(state, dependency)?;
    }

    let goal = Goal {
        id: input.id.clone(),
        description: input.description.clone(),
        status: GoalStatus::Todo,
        parent_id: input.parent_id.clone(),
        dependencies: input.dependencies.clone(),
        notes: input.notes.clone(),
        assignee: input.assignee.clone(),
        removed: false,
    };

    let destination = input
        .insert_before
        .as_deref()
        .and_then(|before| state.goals.iter().position(|g| g.id == before));
    match destination {
        Some(index) => state.goals.insert(index, goal),
        None => state.goals.push(goal),
    }
    Ok(())
}

fn update_goal(state: &mut WbsState, input: &UpdateGoalInput) -> Result<(), WbsError> {
    require_goal(state, &input.id)?;
    if let Some(dependencies) = &input.dependencies {
        for dependency in dependencies {
            require_goal(state, dependency)?;
        }
    }

    let goal = state
        .find_goal_mut(&input.id)
        .ok_or_else(|| WbsError::GoalNotFound {
            id: input.id.clone(),
        })?;
    if let Some(description) = &input.description {
        goal.description = description.clone();
    }
    if let Some(dependencies) = &input.dependencies {
        goal.dependencies = dependencies.clone();
    }
    if let Some(notes) = &input.notes {
        goal.notes = Some(notes.clone());
    }
    if let Some(assignee) = &input.assignee {
        goal.assignee = Some(assignee.clone());
    }
    Ok(())
}

/// Reparent a goal; `None` moves it to the top level.
///
/// Cycles introduced by reparenting are not rejected here, they surface
/// through the invariant check.
fn set_goal_parent(state: &mut WbsState, input: &SetGoalParentInput) -> Result<(), WbsError> {
    require_goal(state, &input.id)?;
    if let Some(parent_id) = &input.parent_id {
        require_goal(state, parent_id)?;
    }

    let goal = state
        .find_goal_mut(&input.id)
        .ok_or_else(|| WbsError::GoalNotFound {
            id: input.id.clone(),
        })?;
    goal.parent_id = input.parent_id.clone();
    Ok(())
}

fn set_goal_status(state: &mut WbsState, input: &SetGoalStatusInput) -> Result<(), WbsError> {
    let goal = state
        .find_goal_mut(&input.id)
        .ok_or_else(|| WbsError::GoalNotFound {
            id: input.id.clone(),
        })?;
    goal.status = input.status;
    Ok(())
}

/// Soft-delete a goal and every descendant reachable over `parentId`.
///
/// The list carries no ordering guarantee between parents and children, so
/// the descendant set is grown to a fixpoint instead of in one sweep.
fn remove_goal(state: &mut WbsState, input: &RemoveGoalInput) -> Result<(), WbsError> {
    require_goal(state, &input.id)?;

    let mut doomed: HashSet<String> = HashSet::new();
    doomed.insert(input.id.clone());
    loop {
        let before = doomed.len();
        for goal in &state.goals {
            if let Some(parent_id) = &goal.parent_id {
                if doomed.contains(parent_id) {
                    doomed.insert(goal.id.clone());
                }
            }
        }
        if doomed.len() == before {
            break;
        }
    }

    for goal in &mut state.goals {
        if doomed.contains(&goal.id) {
            goal.removed = true;
        }
    }
    Ok(())
}

/// Splice the goal out of the flat list and reinsert it before
/// `insertBefore`; absent or unresolvable targets append at the end.
fn move_goal(state: &mut WbsState, input: &MoveGoalInput) -> Result<(), WbsError> {
    let position = state
        .goals
        .iter()
        .position(|g| g.id == input.id)
        .ok_or_else(|| WbsError::GoalNotFound {
            id: input.id.clone(),
        })?;
    let goal = state.goals.remove(position);

    let destination = input
        .insert_before
        .as_deref()
        .and_then(|before| state.goals.iter().position(|g| g.id == before));
    match destination {
        Some(index) => state.goals.insert(index, goal),
        None => state.goals.push(goal),
    }
    Ok(())
}
