//! Validation helpers for `.desk/` layout, config, and documents.

use std::path::Path;

use anyhow::{Context, Result, anyhow};

use documents::chat::state::ChatState;
use documents::document::DocumentModel;
use documents::inbox::state::InboxState;
use documents::projects::state::ProjectsState;
use documents::schema::DocumentKind;
use documents::wbs::state::WbsState;

use crate::io::config::load_config;
use crate::io::init::DeskPaths;
use crate::io::store::load_document;

/// Per-document summary returned by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    pub kind: DocumentKind,
    pub id: String,
    pub revision: u64,
}

/// High-level validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOutcome {
    pub documents: Vec<DocumentSummary>,
}

/// Validate `.desk/` layout, config, and all four documents.
///
/// This is the hard gate for semantic invariants: loads tolerate state
/// invariant reports so documents stay repairable, but `validate` fails on
/// every one of them.
pub fn validate_desk(root: &Path) -> Result<ValidateOutcome> {
    let paths = DeskPaths::new(root);

    ensure_dir(&paths.desk_dir)?;
    ensure_dir(&paths.documents_dir)?;
    ensure_dir(&paths.logs_dir)?;
    ensure_dir(&paths.run_dir)?;

    ensure_file(&paths.config_path)?;
    ensure_file(&paths.chat_path)?;
    ensure_file(&paths.projects_path)?;
    ensure_file(&paths.inbox_path)?;
    ensure_file(&paths.wbs_path)?;

    load_config(&paths.config_path).with_context(|| "load config.toml")?;

    let documents = vec![
        check_document::<ChatState>(DocumentKind::Chat, &paths.chat_path)?,
        check_document::<ProjectsState>(DocumentKind::Projects, &paths.projects_path)?,
        check_document::<InboxState>(DocumentKind::Inbox, &paths.inbox_path)?,
        check_document::<WbsState>(DocumentKind::Wbs, &paths.wbs_path)?,
    ];

    Ok(ValidateOutcome { documents })
}

fn check_document<M: DocumentModel>(kind: DocumentKind, path: &Path) -> Result<DocumentSummary> {
    let doc = load_document::<M>(path).with_context(|| format!("load {}.json", kind.as_str()))?;
    let reports = doc.invariants();
    if !reports.is_empty() {
        return Err(anyhow!(
            "{} invariants failed: {}",
            kind.as_str(),
            reports.join("; ")
        ));
    }
    Ok(DocumentSummary {
        kind,
        id: doc.header.id.clone(),
        revision: doc.header.revision,
    })
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing directory {}", path.display()));
    }
    if !path.is_dir() {
        return Err(anyhow!("expected directory {}", path.display()));
    }
    Ok(())
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("missing file {}", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("expected file {}", path.display()));
    }
    Ok(())
}
