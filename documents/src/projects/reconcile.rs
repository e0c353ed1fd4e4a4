//! Pure planning half of project reconciliation.
//!
//! Derives which transitions would converge `currentStatus` toward
//! `targetedStatus`. Executing them (spawning, killing, probing) is the
//! application's job; this module never touches a process.

use crate::projects::state::{CurrentStatus, Project, ProjectsState, TargetedStatus};

/// One convergence step the supervisor should take for a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No process is up; launch one.
    Start,
    /// A process was launched but startup is unconfirmed; probe it again.
    AwaitStartup,
    /// A live process stands in the way of the target; tear it down.
    Stop,
    /// Nothing is running, so the project can be marked DELETED.
    MarkDeleted,
}

impl Transition {
    pub fn as_str(self) -> &'static str {
        match self {
            Transition::Start => "start",
            Transition::AwaitStartup => "await-startup",
            Transition::Stop => "stop",
            Transition::MarkDeleted => "mark-deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTransition {
    pub project_id: String,
    pub transition: Transition,
}

/// Plan transitions for every unconverged project, in document order.
pub fn plan(state: &ProjectsState) -> Vec<PlannedTransition> {
    state
        .projects
        .iter()
        .filter_map(|project| {
            plan_for(project).map(|transition| PlannedTransition {
                project_id: project.id.clone(),
                transition,
            })
        })
        .collect()
}

/// Transition for a single project, `None` when already converged.
///
/// A DELETED current status is terminal: no transition is ever planned for
/// it, whatever the target says.
pub fn plan_for(project: &Project) -> Option<Transition> {
    match (project.targeted_status, project.current_status) {
        (_, CurrentStatus::Deleted) => None,
        (TargetedStatus::Running, CurrentStatus::Missing | CurrentStatus::Stopped) => {
            Some(Transition::Start)
        }
        (TargetedStatus::Running, CurrentStatus::Initializing) => Some(Transition::AwaitStartup),
        (TargetedStatus::Running, CurrentStatus::Running) => None,
        (TargetedStatus::Stopped, CurrentStatus::Running | CurrentStatus::Initializing) => {
            Some(Transition::Stop)
        }
        (TargetedStatus::Stopped, CurrentStatus::Missing | CurrentStatus::Stopped) => None,
        (TargetedStatus::Deleted, CurrentStatus::Running | CurrentStatus::Initializing) => {
            Some(Transition::Stop)
        }
        (TargetedStatus::Deleted, CurrentStatus::Missing | CurrentStatus::Stopped) => {
            Some(Transition::MarkDeleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{project_with_status, projects_state};

    #[test]
    fn plans_start_for_targeted_running_without_process() {
        for current in [CurrentStatus::Missing, CurrentStatus::Stopped] {
            let project = project_with_status("p1", current, TargetedStatus::Running);
            assert_eq!(plan_for(&project), Some(Transition::Start));
        }
    }

    #[test]
    fn plans_await_startup_while_initializing() {
        let project =
            project_with_status("p1", CurrentStatus::Initializing, TargetedStatus::Running);
        assert_eq!(plan_for(&project), Some(Transition::AwaitStartup));
    }

    /// A stop is planned whenever a live process stands in the way of the
    /// target, including a pending deletion.
    #[test]
    fn plans_stop_for_live_process_with_non_running_target() {
        for targeted in [TargetedStatus::Stopped, TargetedStatus::Deleted] {
            for current in [CurrentStatus::Running, CurrentStatus::Initializing] {
                let project = project_with_status("p1", current, targeted);
                assert_eq!(plan_for(&project), Some(Transition::Stop));
            }
        }
    }

    /// MarkDeleted only fires once no process can be running.
    #[test]
    fn plans_mark_deleted_only_without_live_process() {
        for current in [CurrentStatus::Missing, CurrentStatus::Stopped] {
            let project = project_with_status("p1", current, TargetedStatus::Deleted);
            assert_eq!(plan_for(&project), Some(Transition::MarkDeleted));
        }
    }

    #[test]
    fn converged_projects_plan_nothing() {
        let converged = [
            project_with_status("a", CurrentStatus::Running, TargetedStatus::Running),
            project_with_status("b", CurrentStatus::Stopped, TargetedStatus::Stopped),
            project_with_status("c", CurrentStatus::Missing, TargetedStatus::Stopped),
            project_with_status("d", CurrentStatus::Deleted, TargetedStatus::Deleted),
        ];
        for project in converged {
            assert_eq!(plan_for(&project), None, "project '{}'", project.id);
        }
    }

    /// A DELETED current status is terminal regardless of the target.
    #[test]
    fn deleted_current_status_is_terminal() {
        for targeted in [
            TargetedStatus::Running,
            TargetedStatus::Stopped,
            TargetedStatus::Deleted,
        ] {
            let project = project_with_status("p1", CurrentStatus::Deleted, targeted);
            assert_eq!(plan_for(&project), None);
        }
    }

    /// The plan lists unconverged projects in document order.
    #[test]
    fn plan_preserves_document_order() {
        let state = projects_state(vec![
            project_with_status("a", CurrentStatus::Running, TargetedStatus::Running),
            project_with_status("b", CurrentStatus::Missing, TargetedStatus::Running),
            project_with_status("c", CurrentStatus::Running, TargetedStatus::Stopped),
        ]);

        let plan = plan(&state);
        assert_eq!(
            plan,
            vec![
                PlannedTransition {
                    project_id: "b".to_string(),
                    transition: Transition::Start,
                },
                PlannedTransition {
                    project_id: "c".to_string(),
                    transition: Transition::Stop,
                },
            ]
        );
    }
}
