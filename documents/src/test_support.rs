//! Test-only builders for document states.

use crate::inbox::state::{InboxState, Stakeholder, Thread, ThreadMessage, ThreadParty, ThreadStatus};
use crate::projects::state::{
    CurrentStatus, Project, ProjectConfig, ProjectRuntime, ProjectsState, TargetedStatus,
};
use crate::wbs::state::{Goal, GoalStatus, WbsState};
use chrono::Utc;

/// Create a project with deterministic fields, MISSING and targeted STOPPED.
pub fn project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        name: format!("{id} project"),
        path: format!("/tmp/{id}"),
        current_status: CurrentStatus::Missing,
        targeted_status: TargetedStatus::Stopped,
        config: ProjectConfig::default(),
        runtime: None,
        logs: Vec::new(),
    }
}

/// Create a project with explicit statuses.
pub fn project_with_status(id: &str, current: CurrentStatus, targeted: TargetedStatus) -> Project {
    let mut project = project(id);
    project.current_status = current;
    project.targeted_status = targeted;
    project
}

/// Create a healthy RUNNING project with a recorded runtime.
pub fn running_project(id: &str, pid: u32) -> Project {
    let mut project = project_with_status(id, CurrentStatus::Running, TargetedStatus::Running);
    project.runtime = Some(ProjectRuntime {
        pid,
        started_at: Utc::now(),
        ports: project.config.ports.clone(),
    });
    project
}

pub fn projects_state(projects: Vec<Project>) -> ProjectsState {
    ProjectsState { projects }
}

/// Create an active stakeholder with a deterministic address.
pub fn stakeholder(id: &str, name: &str) -> Stakeholder {
    Stakeholder {
        id: id.to_string(),
        name: name.to_string(),
        eth_address: format!("0x{id:0<40}"),
        avatar: None,
        removed: false,
    }
}

/// Create an open thread with no messages.
pub fn thread(id: &str, stakeholder: &str) -> Thread {
    Thread {
        id: id.to_string(),
        stakeholder: stakeholder.to_string(),
        topic: format!("{id} topic"),
        status: ThreadStatus::Open,
        messages: Vec::new(),
    }
}

/// Create a stakeholder-authored message stamped now.
pub fn thread_message(id: &str) -> ThreadMessage {
    ThreadMessage {
        id: id.to_string(),
        author: ThreadParty::Stakeholder,
        content: format!("{id} content"),
        timestamp: Utc::now(),
    }
}

pub fn inbox_state(stakeholders: Vec<Stakeholder>, threads: Vec<Thread>) -> InboxState {
    InboxState {
        stakeholders,
        threads,
    }
}

/// Create an active TODO goal with no dependencies.
pub fn goal(id: &str, parent_id: Option<&str>) -> Goal {
    Goal {
        id: id.to_string(),
        description: format!("{id} description"),
        status: GoalStatus::Todo,
        parent_id: parent_id.map(str::to_string),
        dependencies: Vec::new(),
        notes: None,
        assignee: None,
        removed: false,
    }
}

pub fn wbs_state(goals: Vec<Goal>) -> WbsState {
    WbsState { goals }
}
