//! Reducer for the projects document.
//!
//! Only `SET_PROJECT_STATUS` moves `currentStatus`; every other action moves
//! the target or edits project data. Preconditions stop at duplicate and
//! not-found checks: a nonsensical target is converged (or reported by the
//! invariant check), not rejected here.

use crate::projects::actions::{
    AppendProjectLogInput, CreateProjectInput, ProjectIdInput, ProjectsAction,
    SetProjectConfigInput, SetProjectRuntimeInput, SetProjectStatusInput, UpdateProjectInput,
};
use crate::projects::error::ProjectsError;
use crate::projects::state::{
    CurrentStatus, Project, ProjectLogEntry, ProjectRuntime, ProjectsState, TargetedStatus,
};

pub fn reduce(state: &mut ProjectsState, action: &ProjectsAction) -> Result<(), ProjectsError> {
    match action {
        ProjectsAction::CreateProject(input) => create_project(state, input),
        ProjectsAction::UpdateProject(input) => update_project(state, input),
        ProjectsAction::SetProjectConfig(input) => set_project_config(state, input),
        ProjectsAction::RunProject(input) => run_project(state, input),
        ProjectsAction::StopProject(input) => stop_project(state, input),
        ProjectsAction::DeleteProject(input) => delete_project(state, input),
        ProjectsAction::SetProjectStatus(input) => set_project_status(state, input),
        ProjectsAction::SetProjectRuntime(input) => set_project_runtime(state, input),
        ProjectsAction::AppendProjectLog(input) => append_project_log(state, input),
    }
}

fn find_project_mut<'a>(
    state: &'a mut ProjectsState,
    id: &str,
) -> Result<&'a mut Project, ProjectsError> {
    state
        .find_project_mut(id)
        .ok_or_else(|| ProjectsError::ProjectNotFound { id: id.to_string() })
}

fn create_project(state: &mut ProjectsState, input: &CreateProjectInput) -> Result<(), ProjectsError> {
    if state.find_project(&input.id).is_some() {
        return Err(ProjectsError::DuplicateProject {
            id: input.id.clone(),
        });
    }

    state.projects.push(Project {
        id: input.id.clone(),
        name: input.name.clone(),
        path: input.path.clone(),
        current_status: CurrentStatus::Missing,
        targeted_status: TargetedStatus::Stopped,
        config: input.config.clone().unwrap_or_default(),
        runtime: None,
        logs: Vec::new(),
    });
    Ok(())
}

fn update_project(state: &mut ProjectsState, input: &UpdateProjectInput) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    if let Some(name) = &input.name {
        project.name = name.clone();
    }
    if let Some(path) = &input.path {
        project.path = path.clone();
    }
    Ok(())
}

fn set_project_config(
    state: &mut ProjectsState,
    input: &SetProjectConfigInput,
) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    if let Some(ports) = &input.ports {
        project.config.ports = ports.clone();
    }
    if let Some(timeout_secs) = input.timeout_secs {
        project.config.timeout_secs = timeout_secs;
    }
    if let Some(auto_start) = input.auto_start {
        project.config.auto_start = auto_start;
    }
    Ok(())
}

/// Target this project RUNNING and force every other RUNNING target to
/// STOPPED, so at most one project is ever targeted RUNNING.
fn run_project(state: &mut ProjectsState, input: &ProjectIdInput) -> Result<(), ProjectsError> {
    if state.find_project(&input.id).is_none() {
        return Err(ProjectsError::ProjectNotFound {
            id: input.id.clone(),
        });
    }

    for project in &mut state.projects {
        if project.id == input.id {
            project.targeted_status = TargetedStatus::Running;
        } else if project.targeted_status == TargetedStatus::Running {
            project.targeted_status = TargetedStatus::Stopped;
        }
    }
    Ok(())
}

/// Target STOPPED. The cached runtime record is dropped for a running
/// process; `currentStatus` itself only changes through observation.
fn stop_project(state: &mut ProjectsState, input: &ProjectIdInput) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    project.targeted_status = TargetedStatus::Stopped;
    if project.current_status == CurrentStatus::Running {
        project.runtime = None;
    }
    Ok(())
}

/// Target DELETED. A project with no process to tear down is marked deleted
/// immediately; anything live keeps its current status until the
/// reconciler has stopped it.
fn delete_project(state: &mut ProjectsState, input: &ProjectIdInput) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    project.targeted_status = TargetedStatus::Deleted;
    if project.current_status == CurrentStatus::Missing {
        project.current_status = CurrentStatus::Deleted;
        project.runtime = None;
    }
    Ok(())
}

/// Observation feedback from the supervisor.
fn set_project_status(
    state: &mut ProjectsState,
    input: &SetProjectStatusInput,
) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    project.current_status = input.current_status;
    if !matches!(
        input.current_status,
        CurrentStatus::Running | CurrentStatus::Initializing
    ) {
        project.runtime = None;
    }
    Ok(())
}

fn set_project_runtime(
    state: &mut ProjectsState,
    input: &SetProjectRuntimeInput,
) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    project.runtime = Some(ProjectRuntime {
        pid: input.pid,
        started_at: input.started_at,
        ports: input.ports.clone(),
    });
    Ok(())
}

fn append_project_log(
    state: &mut ProjectsState,
    input: &AppendProjectLogInput,
) -> Result<(), ProjectsError> {
    let project = find_project_mut(state, &input.id)?;
    project.logs.push(ProjectLogEntry {
        timestamp: input.timestamp,
        message: input.message.clone(),
    });
    Ok(())
}
