//! State types for the projects document.

use crate::document::DocumentModel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last observed state of a project's process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrentStatus {
    /// No process found (initial state, or the process died on its own).
    Missing,
    /// Process was stopped deliberately.
    Stopped,
    Running,
    /// Process launched, startup not yet confirmed.
    Initializing,
    Deleted,
}

impl CurrentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CurrentStatus::Missing => "missing",
            CurrentStatus::Stopped => "stopped",
            CurrentStatus::Running => "running",
            CurrentStatus::Initializing => "initializing",
            CurrentStatus::Deleted => "deleted",
        }
    }
}

/// State the operator wants the project's process to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetedStatus {
    Stopped,
    Running,
    Deleted,
}

impl TargetedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetedStatus::Stopped => "stopped",
            TargetedStatus::Running => "running",
            TargetedStatus::Deleted => "deleted",
        }
    }
}

fn default_ports() -> Vec<u16> {
    vec![4000]
}

fn default_timeout_secs() -> u64 {
    30
}

/// Per-project launch configuration.
///
/// Field defaults apply both to `Default::default()` and to partially
/// specified JSON, so `CREATE_PROJECT` inputs may carry a subset of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_ports")]
    pub ports: Vec<u16>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Carried as data for host applications; the reconciler ignores it.
    #[serde(default)]
    pub auto_start: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            ports: default_ports(),
            timeout_secs: default_timeout_secs(),
            auto_start: false,
        }
    }
}

/// Observed runtime info for a launched process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRuntime {
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    pub ports: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Working directory the agent process is launched in.
    pub path: String,
    pub current_status: CurrentStatus,
    pub targeted_status: TargetedStatus,
    pub config: ProjectConfig,
    pub runtime: Option<ProjectRuntime>,
    pub logs: Vec<ProjectLogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsState {
    pub projects: Vec<Project>,
}

impl ProjectsState {
    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn find_project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }
}

impl DocumentModel for ProjectsState {
    type Action = crate::projects::actions::ProjectsAction;
    type Error = crate::projects::error::ProjectsError;

    const DOCUMENT_TYPE: &'static str = "projects";

    fn reduce(state: &mut Self, action: &Self::Action) -> Result<(), Self::Error> {
        crate::projects::reducer::reduce(state, action)
    }

    fn invariants(state: &Self) -> Vec<String> {
        crate::projects::invariants::validate(state)
    }
}
