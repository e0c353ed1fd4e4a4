//! Helpers for launching and stopping agent processes.
//!
//! Agent processes outlive the desk CLI, so output goes straight to a log
//! file instead of captured pipes, and stop/liveness go through `kill` with
//! the pid recorded in the projects document.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};
use wait_timeout::ChildExt;

/// Result of spawning an agent with an early-exit probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Process survived the probe window and is presumed running.
    Started { pid: u32 },
    /// Process exited during the probe window.
    Exited { code: Option<i32> },
}

/// Spawn `command` inside `cwd`, appending stdout/stderr to `log_path`.
///
/// Watches the child for `startup_probe` before declaring it running. A child
/// that survives the probe is detached; its pid is the caller's handle from
/// then on.
#[instrument(skip_all, fields(cwd = %cwd.display(), probe_secs = startup_probe.as_secs()))]
pub fn spawn_agent(
    command: &[String],
    cwd: &Path,
    log_path: &Path,
    startup_probe: Duration,
) -> Result<SpawnOutcome> {
    let program = command
        .first()
        .ok_or_else(|| anyhow!("agent command must not be empty"))?;

    let log = open_log(log_path)?;
    let log_err = log
        .try_clone()
        .with_context(|| format!("clone log handle {}", log_path.display()))?;

    debug!(program = %program, "spawning agent process");
    let mut child = Command::new(program)
        .args(&command[1..])
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err))
        .spawn()
        .with_context(|| format!("spawn agent '{program}'"))?;

    let pid = child.id();
    match child
        .wait_timeout(startup_probe)
        .context("probe agent startup")?
    {
        Some(status) => {
            warn!(pid, code = ?status.code(), "agent exited during startup probe");
            Ok(SpawnOutcome::Exited {
                code: status.code(),
            })
        }
        None => {
            debug!(pid, "agent survived startup probe");
            Ok(SpawnOutcome::Started { pid })
        }
    }
}

/// Check whether a pid is alive (`kill -0`, zombies counted as dead).
///
/// A child this process spawned and detached is never reaped, so after it
/// exits `kill -0` still succeeds on the zombie; the state field in
/// `/proc/<pid>/stat` settles it.
pub fn is_alive(pid: u32) -> bool {
    signal(pid, "-0").unwrap_or(false) && !is_zombie(pid)
}

fn is_zombie(pid: u32) -> bool {
    let stat = match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
        Ok(stat) => stat,
        Err(_) => return false,
    };
    // State is the first field after the parenthesized command name, which
    // may itself contain spaces and parentheses.
    stat.rsplit(')')
        .next()
        .and_then(|rest| rest.split_whitespace().next())
        .is_some_and(|state| state == "Z")
}

/// Stop a process: TERM, wait up to `grace`, then KILL.
///
/// Returns `Ok(true)` if the process is gone, `Ok(false)` if it survived the
/// escalation.
#[instrument(skip_all, fields(pid = pid, grace_secs = grace.as_secs()))]
pub fn stop_process(pid: u32, grace: Duration) -> Result<bool> {
    if !is_alive(pid) {
        debug!(pid, "process already gone");
        return Ok(true);
    }

    signal(pid, "-TERM").with_context(|| format!("send TERM to {pid}"))?;
    if wait_until_dead(pid, grace) {
        debug!(pid, "process exited after TERM");
        return Ok(true);
    }

    warn!(pid, "process survived TERM, sending KILL");
    signal(pid, "-KILL").with_context(|| format!("send KILL to {pid}"))?;
    Ok(wait_until_dead(pid, Duration::from_secs(1)))
}

fn wait_until_dead(pid: u32, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if !is_alive(pid) {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    !is_alive(pid)
}

fn signal(pid: u32, sig: &str) -> Result<bool> {
    let status = Command::new("kill")
        .arg(sig)
        .arg(pid.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .context("run kill")?;
    Ok(status.success())
}

fn open_log(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log {}", path.display()))
}
