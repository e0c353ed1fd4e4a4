//! Initialization helpers for `.desk/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use documents::chat::state::ChatState;
use documents::document::Document;
use documents::inbox::state::InboxState;
use documents::projects::state::ProjectsState;
use documents::schema::DocumentKind;
use documents::wbs::state::WbsState;

use super::config::{DeskConfig, write_config};
use super::store::write_document;

/// All canonical paths within `.desk/` for a workspace root.
#[derive(Debug, Clone)]
pub struct DeskPaths {
    pub root: PathBuf,
    pub desk_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub run_dir: PathBuf,
    pub config_path: PathBuf,
    pub chat_path: PathBuf,
    pub projects_path: PathBuf,
    pub inbox_path: PathBuf,
    pub wbs_path: PathBuf,
}

impl DeskPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let desk_dir = root.join(".desk");
        let documents_dir = desk_dir.join("documents");
        let logs_dir = desk_dir.join("logs");
        let run_dir = desk_dir.join("run");
        Self {
            root: root.clone(),
            desk_dir: desk_dir.clone(),
            documents_dir: documents_dir.clone(),
            logs_dir,
            run_dir,
            config_path: desk_dir.join("config.toml"),
            chat_path: documents_dir.join("chat.json"),
            projects_path: documents_dir.join("projects.json"),
            inbox_path: documents_dir.join("inbox.json"),
            wbs_path: documents_dir.join("wbs.json"),
        }
    }

    /// Document file for a kind.
    pub fn document_path(&self, kind: DocumentKind) -> &Path {
        match kind {
            DocumentKind::Chat => &self.chat_path,
            DocumentKind::Projects => &self.projects_path,
            DocumentKind::Inbox => &self.inbox_path,
            DocumentKind::Wbs => &self.wbs_path,
        }
    }

    /// Captured process output for a project.
    pub fn project_log_path(&self, project_id: &str) -> PathBuf {
        self.logs_dir.join(format!("{project_id}.log"))
    }

    /// Supervisor pid record for a project.
    pub fn pidfile_path(&self, project_id: &str) -> PathBuf {
        self.run_dir.join(format!("{project_id}.pid"))
    }
}

/// Options for `init_desk`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing desk-owned files.
    pub force: bool,
}

/// Create `.desk/` scaffolding in `root`.
///
/// Seeds the config file and one default document per kind. The document id
/// is the kind name, matching the file it lives in. Fails if `.desk/` already
/// exists unless `options.force` is set.
pub fn init_desk(root: &Path, options: &InitOptions) -> Result<DeskPaths> {
    let paths = DeskPaths::new(root);
    if paths.desk_dir.exists() && !options.force {
        return Err(anyhow!(
            "desk init: .desk already exists (use --force to overwrite)"
        ));
    }
    if paths.desk_dir.exists() && !paths.desk_dir.is_dir() {
        return Err(anyhow!("desk init: .desk exists but is not a directory"));
    }

    create_dir(&paths.desk_dir)?;
    create_dir(&paths.documents_dir)?;
    create_dir(&paths.logs_dir)?;
    create_dir(&paths.run_dir)?;

    write_config(&paths.config_path, &DeskConfig::default())?;
    write_document(
        &paths.chat_path,
        &Document::<ChatState>::new(DocumentKind::Chat.as_str()),
    )?;
    write_document(
        &paths.projects_path,
        &Document::<ProjectsState>::new(DocumentKind::Projects.as_str()),
    )?;
    write_document(
        &paths.inbox_path,
        &Document::<InboxState>::new(DocumentKind::Inbox.as_str()),
    )?;
    write_document(
        &paths.wbs_path,
        &Document::<WbsState>::new(DocumentKind::Wbs.as_str()),
    )?;

    Ok(paths)
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))
}
