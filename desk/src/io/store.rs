//! Document load/save helpers with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{debug, warn};

use documents::document::{Document, DocumentModel};
use documents::schema::{self, DocumentKind};

/// Load and validate a document from disk.
///
/// Schema and envelope invariants fail the load: they only trip on corrupt
/// or hand-edited files. State invariant reports are logged and tolerated —
/// reducers deliberately accept some flagged states (a reparent closing a
/// cycle, for one), and failing here would wedge the document with no action
/// able to repair it. `desk validate` is the hard gate for those.
pub fn load_document<M: DocumentModel>(path: &Path) -> Result<Document<M>> {
    debug!(path = %path.display(), "loading document");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse document {}", path.display()))?;
    let kind = kind_of::<M>()?;
    if let Err(errors) = schema::validate_document(kind, &value) {
        return Err(anyhow!(
            "document schema validation failed for {}: {}",
            path.display(),
            errors.join("; ")
        ));
    }
    let doc: Document<M> = serde_json::from_value(value)
        .with_context(|| format!("deserialize document {}", path.display()))?;
    let errors = doc.envelope_invariants();
    if !errors.is_empty() {
        return Err(anyhow!(
            "document invariants failed for {}: {}",
            path.display(),
            errors.join("; ")
        ));
    }
    for report in M::invariants(&doc.state) {
        warn!(path = %path.display(), %report, "document state invariant violated");
    }
    debug!(id = %doc.header.id, revision = doc.header.revision, "document loaded");
    Ok(doc)
}

/// Atomically write a document to disk (temp file + rename).
pub fn write_document<M: DocumentModel>(path: &Path, doc: &Document<M>) -> Result<()> {
    debug!(path = %path.display(), id = %doc.header.id, revision = doc.header.revision, "writing document");
    let mut buf = serde_json::to_string_pretty(doc)?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Validate a raw action payload against the model's action schema.
///
/// Runs before deserialization so unknown action types and malformed inputs
/// surface as schema errors rather than serde noise.
pub fn check_action<M: DocumentModel>(action: &Value) -> Result<()> {
    let kind = kind_of::<M>()?;
    if let Err(errors) = schema::validate_action(kind, action) {
        return Err(anyhow!(
            "action schema validation failed: {}",
            errors.join("; ")
        ));
    }
    Ok(())
}

fn kind_of<M: DocumentModel>() -> Result<DocumentKind> {
    DocumentKind::parse(M::DOCUMENT_TYPE)
        .ok_or_else(|| anyhow!("unknown document type '{}'", M::DOCUMENT_TYPE))
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("document path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp document {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("replace document {}", path.display()))?;
    Ok(())
}
