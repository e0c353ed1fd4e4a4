//! Semantic invariants for the projects document.

use crate::projects::state::{CurrentStatus, ProjectsState, TargetedStatus};
use std::collections::HashSet;

/// Check semantic invariants not expressible in JSON Schema:
/// - No duplicate project ids
/// - At most one project targeted RUNNING
/// - `timeoutSecs > 0`
/// - Runtime recorded only while a process can be live
///
/// RUNNING without a runtime record is legal: STOP_PROJECT clears the cached
/// runtime while the observed status waits for reconciliation.
pub fn validate(state: &ProjectsState) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for project in &state.projects {
        if !seen.insert(project.id.as_str()) {
            errors.push(format!("duplicate project id '{}'", project.id));
        }
    }

    let running_targets: Vec<&str> = state
        .projects
        .iter()
        .filter(|p| p.targeted_status == TargetedStatus::Running)
        .map(|p| p.id.as_str())
        .collect();
    if running_targets.len() > 1 {
        errors.push(format!(
            "multiple projects targeted RUNNING: {}",
            running_targets.join(", ")
        ));
    }

    for project in &state.projects {
        if project.config.timeout_secs == 0 {
            errors.push(format!("project '{}': timeoutSecs must be > 0", project.id));
        }

        let live = matches!(
            project.current_status,
            CurrentStatus::Running | CurrentStatus::Initializing
        );
        if !live && project.runtime.is_some() {
            errors.push(format!(
                "project '{}' has stale runtime while {}",
                project.id,
                project.current_status.as_str()
            ));
        }
    }

    errors
}
