//! Action union and creators for the projects document.

use crate::projects::state::{CurrentStatus, ProjectConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectInput {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Defaults apply when absent or partially specified.
    #[serde(default)]
    pub config: Option<ProjectConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectConfigInput {
    pub id: String,
    #[serde(default)]
    pub ports: Option<Vec<u16>>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub auto_start: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIdInput {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectStatusInput {
    pub id: String,
    pub current_status: CurrentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProjectRuntimeInput {
    pub id: String,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
    pub ports: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendProjectLogInput {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "input", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectsAction {
    CreateProject(CreateProjectInput),
    UpdateProject(UpdateProjectInput),
    SetProjectConfig(SetProjectConfigInput),
    RunProject(ProjectIdInput),
    StopProject(ProjectIdInput),
    DeleteProject(ProjectIdInput),
    SetProjectStatus(SetProjectStatusInput),
    SetProjectRuntime(SetProjectRuntimeInput),
    AppendProjectLog(AppendProjectLogInput),
}

impl ProjectsAction {
    pub fn create_project(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        ProjectsAction::CreateProject(CreateProjectInput {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            config: None,
        })
    }

    pub fn run_project(id: impl Into<String>) -> Self {
        ProjectsAction::RunProject(ProjectIdInput { id: id.into() })
    }

    pub fn stop_project(id: impl Into<String>) -> Self {
        ProjectsAction::StopProject(ProjectIdInput { id: id.into() })
    }

    pub fn delete_project(id: impl Into<String>) -> Self {
        ProjectsAction::DeleteProject(ProjectIdInput { id: id.into() })
    }

    pub fn set_project_status(id: impl Into<String>, current_status: CurrentStatus) -> Self {
        ProjectsAction::SetProjectStatus(SetProjectStatusInput {
            id: id.into(),
            current_status,
        })
    }

    pub fn set_project_runtime(
        id: impl Into<String>,
        pid: u32,
        started_at: DateTime<Utc>,
        ports: Vec<u16>,
    ) -> Self {
        ProjectsAction::SetProjectRuntime(SetProjectRuntimeInput {
            id: id.into(),
            pid,
            started_at,
            ports,
        })
    }

    /// Append a log line stamped with the current time.
    pub fn append_project_log(id: impl Into<String>, message: impl Into<String>) -> Self {
        ProjectsAction::AppendProjectLog(AppendProjectLogInput {
            id: id.into(),
            timestamp: Utc::now(),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Partial config JSON fills unspecified fields with defaults.
    #[test]
    fn create_input_accepts_partial_config() {
        let input: CreateProjectInput = serde_json::from_str(
            r#"{"id": "p1", "name": "Demo", "path": "/tmp/demo", "config": {"ports": [5000]}}"#,
        )
        .expect("deserialize");

        let config = input.config.expect("config");
        assert_eq!(config.ports, vec![5000]);
        assert_eq!(config.timeout_secs, 30);
        assert!(!config.auto_start);
    }

    #[test]
    fn status_action_uses_wire_spellings() {
        let action: ProjectsAction = serde_json::from_str(
            r#"{"type": "SET_PROJECT_STATUS", "input": {"id": "p1", "currentStatus": "RUNNING"}}"#,
        )
        .expect("deserialize");
        assert_eq!(
            action,
            ProjectsAction::set_project_status("p1", CurrentStatus::Running)
        );
    }
}
