//! Supervisor pid records under `.desk/run/`.
//!
//! The projects document caches runtime info, but STOP_PROJECT clears that
//! cache while the process may still be up. These files are the supervisor's
//! own record: written on launch, consulted when the document has no pid,
//! removed once the process is confirmed stopped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

/// Record a launched pid.
pub fn write_pidfile(path: &Path, pid: u32) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("pidfile path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    debug!(path = %path.display(), pid, "writing pidfile");
    fs::write(path, format!("{pid}\n")).with_context(|| format!("write pidfile {}", path.display()))
}

/// Read a recorded pid. A missing file means no record.
pub fn read_pidfile(path: &Path) -> Result<Option<u32>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents =
        fs::read_to_string(path).with_context(|| format!("read pidfile {}", path.display()))?;
    let pid = contents
        .trim()
        .parse::<u32>()
        .with_context(|| format!("parse pid in {}", path.display()))?;
    Ok(Some(pid))
}

/// Remove a pid record. A missing file is not an error.
pub fn clear_pidfile(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove pidfile {}", path.display())),
    }
}
