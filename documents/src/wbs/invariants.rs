//! Semantic invariants for the wbs document.

use crate::wbs::state::{Goal, WbsState};
use std::collections::HashSet;

/// Check semantic invariants not expressible in JSON Schema:
/// - No duplicate goal ids
/// - Parent and dependency references resolve
/// - Parent chains are acyclic
/// - No active goal sits under a removed parent
pub fn validate(state: &WbsState) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for goal in &state.goals {
        if !seen.insert(goal.id.as_str()) {
            errors.push(format!("duplicate goal id '{}'", goal.id));
        }
    }

    for goal in &state.goals {
        if let Some(parent_id) = &goal.parent_id {
            match state.find_goal(parent_id) {
                None => errors.push(format!(
                    "goal '{}' references unknown parent '{}'",
                    goal.id, parent_id
                )),
                Some(parent) => {
                    if parent.removed && !goal.removed {
                        errors.push(format!(
                            "goal '{}' is active under removed parent '{}'",
                            goal.id, parent_id
                        ));
                    }
                }
            }
        }

        for dependency in &goal.dependencies {
            if state.find_goal(dependency).is_none() {
                errors.push(format!(
                    "goal '{}' references unknown dependency '{}'",
                    goal.id, dependency
                ));
            }
        }

        if on_parent_cycle(state, goal) {
            errors.push(format!("parent cycle involving goal '{}'", goal.id));
        }
    }

    errors
}

/// True if walking `parentId` from `start` leads back to `start`.
///
/// The walk is bounded by the goal count so a cycle elsewhere in the chain
/// cannot loop the check itself.
fn on_parent_cycle(state: &WbsState, start: &Goal) -> bool {
    let mut current = start.parent_id.as_deref();
    let mut hops = 0;
    while let Some(parent_id) = current {
        if parent_id == start.id {
            return true;
        }
        hops += 1;
        if hops > state.goals.len() {
            return false;
        }
        current = state
            .find_goal(parent_id)
            .and_then(|g| g.parent_id.as_deref());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{goal, wbs_state};

    #[test]
    fn default_and_healthy_states_are_valid() {
        assert!(validate(&WbsState::default()).is_empty());

        let state = wbs_state(vec![goal("g1", None), goal("g2", Some("g1"))]);
        assert!(validate(&state).is_empty());
    }

    #[test]
    fn flags_dangling_references() {
        let mut dependent = goal("g1", Some("ghost"));
        dependent.dependencies = vec!["nope".to_string()];
        let errors = validate(&wbs_state(vec![dependent]));

        assert!(errors.iter().any(|e| e.contains("unknown parent")));
        assert!(errors.iter().any(|e| e.contains("unknown dependency")));
    }

    /// Reparenting can produce cycles; the check names each goal on the loop.
    #[test]
    fn flags_parent_cycles() {
        let state = wbs_state(vec![
            goal("g1", Some("g2")),
            goal("g2", Some("g1")),
            goal("g3", None),
        ]);

        let errors = validate(&state);
        assert!(errors.iter().any(|e| e.contains("cycle involving goal 'g1'")));
        assert!(errors.iter().any(|e| e.contains("cycle involving goal 'g2'")));
        assert!(!errors.iter().any(|e| e.contains("'g3'")));
    }

    #[test]
    fn flags_active_goal_under_removed_parent() {
        let mut parent = goal("g1", None);
        parent.removed = true;
        let state = wbs_state(vec![parent, goal("g2", Some("g1"))]);

        let errors = validate(&state);
        assert!(errors.iter().any(|e| e.contains("active under removed parent")));
    }
}
