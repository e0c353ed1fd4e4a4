//! Drive projects toward their targeted statuses.
//!
//! One pass has three phases: probe recorded processes and demote dead ones
//! to MISSING, plan transitions on the refreshed state, then execute the
//! plan through reducer actions. The projects document is saved once at the
//! end, so a crashed pass never leaves a half-written file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use tracing::{info, warn};

use documents::document::Document;
use documents::projects::actions::ProjectsAction;
use documents::projects::reconcile::{PlannedTransition, Transition, plan};
use documents::projects::state::{CurrentStatus, Project, ProjectsState};

use crate::io::config::{DeskConfig, load_config};
use crate::io::init::DeskPaths;
use crate::io::pidfile::{clear_pidfile, read_pidfile, write_pidfile};
use crate::io::process::SpawnOutcome;
use crate::io::store::{load_document, write_document};
use crate::io::supervisor::{LaunchRequest, ProjectLauncher};

/// Options for `reconcile`.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Observe and plan, but execute nothing and write nothing.
    pub dry_run: bool,
}

/// What one reconcile pass observed and did.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Projects whose recorded process turned out to be gone.
    pub marked_missing: Vec<String>,
    /// Transitions planned after the probe phase.
    pub planned: Vec<PlannedTransition>,
    /// Executed step descriptions, in order.
    pub actions: Vec<String>,
}

impl ReconcileReport {
    /// True when the plan was non-empty (used for the dry-run exit code).
    pub fn diverged(&self) -> bool {
        !self.planned.is_empty()
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        if !self.marked_missing.is_empty() {
            lines.push(format!(
                "probe: marked missing: {}",
                self.marked_missing.join(", ")
            ));
        }
        if self.planned.is_empty() {
            lines.push("in sync: no pending transitions".to_string());
        } else {
            lines.push(format!("pending transitions ({}):", self.planned.len()));
            for item in &self.planned {
                lines.push(format!(
                    "  - {}: {}",
                    item.project_id,
                    item.transition.as_str()
                ));
            }
        }
        if !self.actions.is_empty() {
            lines.push("applied:".to_string());
            for action in &self.actions {
                lines.push(format!("  - {action}"));
            }
        }
        lines.join("\n")
    }
}

/// Run one reconcile pass for the desk under `root`.
pub fn reconcile(
    root: &Path,
    launcher: &dyn ProjectLauncher,
    options: &ReconcileOptions,
) -> Result<ReconcileReport> {
    let paths = DeskPaths::new(root);
    let config = load_config(&paths.config_path).with_context(|| "load config.toml")?;
    let mut doc: Document<ProjectsState> =
        load_document(&paths.projects_path).with_context(|| "load projects.json")?;

    let mut report = ReconcileReport::default();

    probe(&paths, launcher, &mut doc, &mut report)?;
    report.planned = plan(&doc.state);

    if options.dry_run {
        info!(
            planned = report.planned.len(),
            "dry run: skipping execution"
        );
        return Ok(report);
    }

    let planned = report.planned.clone();
    for item in &planned {
        execute(&paths, &config, launcher, &mut doc, item, &mut report)?;
    }

    write_document(&paths.projects_path, &doc).with_context(|| "save projects.json")?;
    Ok(report)
}

/// Demote projects whose recorded process is not actually there.
///
/// The pid comes from the document's runtime cache when present, else from
/// the supervisor's pidfile (STOP_PROJECT clears the cache while the process
/// may still be up). No record at all, or a dead pid, means nothing is
/// running.
fn probe(
    paths: &DeskPaths,
    launcher: &dyn ProjectLauncher,
    doc: &mut Document<ProjectsState>,
    report: &mut ReconcileReport,
) -> Result<()> {
    let candidates: Vec<String> = doc
        .state
        .projects
        .iter()
        .filter(|project| {
            matches!(
                project.current_status,
                CurrentStatus::Running | CurrentStatus::Initializing
            )
        })
        .map(|project| project.id.clone())
        .collect();

    for project_id in candidates {
        let pid = recorded_pid(paths, doc, &project_id)?;
        if let Some(pid) = pid
            && launcher.is_alive(pid)
        {
            continue;
        }
        let message = match pid {
            Some(pid) => format!("process {pid} is gone; marking missing"),
            None => "no recorded process; marking missing".to_string(),
        };
        warn!(project = %project_id, pid = ?pid, "recorded process not found");
        clear_pidfile(&paths.pidfile_path(&project_id))?;
        apply(doc, &ProjectsAction::append_project_log(&project_id, message))?;
        apply(
            doc,
            &ProjectsAction::set_project_status(&project_id, CurrentStatus::Missing),
        )?;
        report.marked_missing.push(project_id);
    }
    Ok(())
}

/// Pid for a project: runtime cache first, supervisor pidfile second.
fn recorded_pid(
    paths: &DeskPaths,
    doc: &Document<ProjectsState>,
    project_id: &str,
) -> Result<Option<u32>> {
    let cached = doc
        .state
        .find_project(project_id)
        .and_then(|project| project.runtime.as_ref().map(|runtime| runtime.pid));
    match cached {
        Some(pid) => Ok(Some(pid)),
        None => read_pidfile(&paths.pidfile_path(project_id)),
    }
}

fn execute(
    paths: &DeskPaths,
    config: &DeskConfig,
    launcher: &dyn ProjectLauncher,
    doc: &mut Document<ProjectsState>,
    item: &PlannedTransition,
    report: &mut ReconcileReport,
) -> Result<()> {
    match item.transition {
        Transition::Start => start_project(paths, config, launcher, doc, &item.project_id, report),
        Transition::AwaitStartup => confirm_startup(doc, &item.project_id, report),
        Transition::Stop => stop_project(paths, config, launcher, doc, &item.project_id, report),
        Transition::MarkDeleted => mark_deleted(paths, doc, &item.project_id, report),
    }
}

fn start_project(
    paths: &DeskPaths,
    config: &DeskConfig,
    launcher: &dyn ProjectLauncher,
    doc: &mut Document<ProjectsState>,
    project_id: &str,
    report: &mut ReconcileReport,
) -> Result<()> {
    let (workdir, ports) = {
        let project = find(doc, project_id)?;
        (PathBuf::from(&project.path), project.config.ports.clone())
    };

    apply(
        doc,
        &ProjectsAction::set_project_status(project_id, CurrentStatus::Initializing),
    )?;
    apply(
        doc,
        &ProjectsAction::append_project_log(
            project_id,
            format!("starting agent: {}", config.agent_command.join(" ")),
        ),
    )?;

    let request = LaunchRequest {
        project_id: project_id.to_string(),
        command: config.agent_command.clone(),
        workdir,
        log_path: paths.project_log_path(project_id),
        startup_probe: Duration::from_secs(config.startup_probe_secs),
    };
    match launcher.start(&request) {
        Ok(SpawnOutcome::Started { pid }) => {
            write_pidfile(&paths.pidfile_path(project_id), pid)?;
            apply(
                doc,
                &ProjectsAction::set_project_runtime(project_id, pid, Utc::now(), ports),
            )?;
            apply(
                doc,
                &ProjectsAction::set_project_status(project_id, CurrentStatus::Running),
            )?;
            apply(
                doc,
                &ProjectsAction::append_project_log(project_id, format!("agent running (pid {pid})")),
            )?;
            info!(project = %project_id, pid, "project started");
            report.actions.push(format!("{project_id}: started (pid {pid})"));
        }
        Ok(SpawnOutcome::Exited { code }) => {
            let detail = match code {
                Some(code) => format!("exit code {code}"),
                None => "terminated by signal".to_string(),
            };
            apply(
                doc,
                &ProjectsAction::set_project_status(project_id, CurrentStatus::Missing),
            )?;
            apply(
                doc,
                &ProjectsAction::append_project_log(
                    project_id,
                    format!("agent exited during startup ({detail})"),
                ),
            )?;
            warn!(project = %project_id, code = ?code, "agent exited during startup");
            report
                .actions
                .push(format!("{project_id}: failed to start ({detail})"));
        }
        Err(err) => {
            apply(
                doc,
                &ProjectsAction::set_project_status(project_id, CurrentStatus::Missing),
            )?;
            apply(
                doc,
                &ProjectsAction::append_project_log(
                    project_id,
                    format!("failed to launch agent: {err:#}"),
                ),
            )?;
            warn!(project = %project_id, err = %err, "failed to launch agent");
            report.actions.push(format!("{project_id}: failed to launch"));
        }
    }
    Ok(())
}

/// Promote INITIALIZING to RUNNING once its process is confirmed alive.
///
/// The probe phase already demoted entries with no live process, so any
/// project still INITIALIZING here has a live pid.
fn confirm_startup(
    doc: &mut Document<ProjectsState>,
    project_id: &str,
    report: &mut ReconcileReport,
) -> Result<()> {
    let pid = find(doc, project_id)?.runtime.as_ref().map(|r| r.pid);
    if let Some(pid) = pid {
        apply(
            doc,
            &ProjectsAction::set_project_status(project_id, CurrentStatus::Running),
        )?;
        apply(
            doc,
            &ProjectsAction::append_project_log(
                project_id,
                format!("startup confirmed (pid {pid})"),
            ),
        )?;
        info!(project = %project_id, pid, "startup confirmed");
        report
            .actions
            .push(format!("{project_id}: startup confirmed (pid {pid})"));
    }
    Ok(())
}

fn stop_project(
    paths: &DeskPaths,
    config: &DeskConfig,
    launcher: &dyn ProjectLauncher,
    doc: &mut Document<ProjectsState>,
    project_id: &str,
    report: &mut ReconcileReport,
) -> Result<()> {
    find(doc, project_id)?;
    let pid = recorded_pid(paths, doc, project_id)?;
    if let Some(pid) = pid {
        apply(
            doc,
            &ProjectsAction::append_project_log(project_id, format!("stopping agent (pid {pid})")),
        )?;
        let stopped = launcher
            .stop(pid, Duration::from_secs(config.stop_grace_secs))
            .with_context(|| format!("stop project '{project_id}'"))?;
        if !stopped {
            warn!(project = %project_id, pid, "process survived stop escalation");
            apply(
                doc,
                &ProjectsAction::append_project_log(
                    project_id,
                    format!("process {pid} survived stop escalation"),
                ),
            )?;
        }
    }
    clear_pidfile(&paths.pidfile_path(project_id))?;
    apply(
        doc,
        &ProjectsAction::set_project_status(project_id, CurrentStatus::Stopped),
    )?;
    apply(
        doc,
        &ProjectsAction::append_project_log(project_id, "agent stopped"),
    )?;
    info!(project = %project_id, "project stopped");
    report.actions.push(format!("{project_id}: stopped"));
    Ok(())
}

fn mark_deleted(
    paths: &DeskPaths,
    doc: &mut Document<ProjectsState>,
    project_id: &str,
    report: &mut ReconcileReport,
) -> Result<()> {
    clear_pidfile(&paths.pidfile_path(project_id))?;
    apply(
        doc,
        &ProjectsAction::set_project_status(project_id, CurrentStatus::Deleted),
    )?;
    apply(
        doc,
        &ProjectsAction::append_project_log(project_id, "project deleted"),
    )?;
    info!(project = %project_id, "project deleted");
    report.actions.push(format!("{project_id}: deleted"));
    Ok(())
}

fn find<'doc>(doc: &'doc Document<ProjectsState>, project_id: &str) -> Result<&'doc Project> {
    doc.state
        .find_project(project_id)
        .ok_or_else(|| anyhow!("unknown project '{project_id}'"))
}

fn apply(doc: &mut Document<ProjectsState>, action: &ProjectsAction) -> Result<()> {
    doc.apply(action).context("apply reconcile action")
}
