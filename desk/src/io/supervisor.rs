//! Launcher abstraction for agent process supervision.
//!
//! The [`ProjectLauncher`] trait decouples reconcile orchestration from real
//! process control. Tests use scripted launchers that return predetermined
//! outcomes without spawning anything.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use super::process::{SpawnOutcome, is_alive, spawn_agent, stop_process};

/// Parameters for launching one project's agent.
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Project id, for logging and log file naming.
    pub project_id: String,
    /// Command argv from desk config.
    pub command: Vec<String>,
    /// Working directory: the project's `path`.
    pub workdir: PathBuf,
    /// Where stdout/stderr are appended.
    pub log_path: PathBuf,
    /// Early-exit probe window.
    pub startup_probe: Duration,
}

/// Abstraction over process supervision backends.
pub trait ProjectLauncher {
    /// Launch the agent, probing for an early exit.
    fn start(&self, request: &LaunchRequest) -> Result<SpawnOutcome>;
    /// Stop a previously launched agent by pid.
    fn stop(&self, pid: u32, grace: Duration) -> Result<bool>;
    /// Probe whether a previously recorded pid is still alive.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Launcher that spawns real local processes.
pub struct LocalLauncher;

impl ProjectLauncher for LocalLauncher {
    fn start(&self, request: &LaunchRequest) -> Result<SpawnOutcome> {
        info!(project = %request.project_id, workdir = %request.workdir.display(), "launching agent");
        spawn_agent(
            &request.command,
            &request.workdir,
            &request.log_path,
            request.startup_probe,
        )
    }

    fn stop(&self, pid: u32, grace: Duration) -> Result<bool> {
        stop_process(pid, grace)
    }

    fn is_alive(&self, pid: u32) -> bool {
        is_alive(pid)
    }
}
