//! Desk configuration stored under `.desk/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Desk configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeskConfig {
    /// Command launched inside a project's `path` when reconcile starts it
    /// (e.g. `["agent","serve"]`).
    pub agent_command: Vec<String>,

    /// Seconds to watch a freshly launched process for an early exit before
    /// declaring it running.
    pub startup_probe_secs: u64,

    /// Seconds to wait for a stopped process to exit before giving up.
    pub stop_grace_secs: u64,

    pub defaults: ProjectDefaults,
}

/// Seed values applied to newly created projects.
///
/// `apply` copies these into a `CREATE_PROJECT` input that carries no config
/// of its own; an explicit config in the action wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectDefaults {
    pub ports: Vec<u16>,
    pub timeout_secs: u64,
    pub auto_start: bool,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            ports: vec![4000],
            timeout_secs: 30,
            auto_start: false,
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            agent_command: vec!["agent".to_string(), "serve".to_string()],
            startup_probe_secs: 5,
            stop_grace_secs: 10,
            defaults: ProjectDefaults::default(),
        }
    }
}

impl DeskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.agent_command.is_empty() || self.agent_command[0].trim().is_empty() {
            return Err(anyhow!("agent_command must be a non-empty array"));
        }
        if self.startup_probe_secs == 0 {
            return Err(anyhow!("startup_probe_secs must be > 0"));
        }
        if self.stop_grace_secs == 0 {
            return Err(anyhow!("stop_grace_secs must be > 0"));
        }
        if self.defaults.timeout_secs == 0 {
            return Err(anyhow!("defaults.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DeskConfig::default()`.
pub fn load_config(path: &Path) -> Result<DeskConfig> {
    if !path.exists() {
        let cfg = DeskConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DeskConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DeskConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DeskConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let mut cfg = DeskConfig::default();
        cfg.agent_command = vec!["sleep".to_string(), "60".to_string()];
        cfg.defaults.ports = vec![4000, 4001];
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    /// Partial TOML fills missing fields from defaults.
    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "startup_probe_secs = 2\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.startup_probe_secs, 2);
        assert_eq!(cfg.agent_command, DeskConfig::default().agent_command);
        assert_eq!(cfg.defaults, ProjectDefaults::default());
    }

    #[test]
    fn empty_agent_command_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "agent_command = []\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("agent_command"));
    }
}
