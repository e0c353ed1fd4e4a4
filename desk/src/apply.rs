//! Apply a wire action to a persisted document.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use documents::chat::state::ChatState;
use documents::document::DocumentModel;
use documents::inbox::state::InboxState;
use documents::projects::state::ProjectsState;
use documents::schema::DocumentKind;
use documents::wbs::state::WbsState;

use crate::io::config::load_config;
use crate::io::init::DeskPaths;
use crate::io::store::{check_action, load_document, write_document};

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Action committed and document saved.
    Applied {
        kind: DocumentKind,
        action_type: String,
        revision: u64,
    },
    /// A reducer precondition failed. The document file is untouched.
    Rejected { kind: DocumentKind, message: String },
}

/// Apply a raw action payload to the document of `kind` under `root`.
///
/// The payload is validated against the document's action schema before
/// deserialization, so unknown types and malformed inputs fail as schema
/// errors. Reducer rejections come back as [`ApplyOutcome::Rejected`] rather
/// than `Err`, since the caller maps them to a dedicated exit code.
pub fn apply_action(root: &Path, kind: DocumentKind, raw: &Value) -> Result<ApplyOutcome> {
    let paths = DeskPaths::new(root);
    match kind {
        DocumentKind::Chat => apply_to::<ChatState>(&paths, kind, raw),
        DocumentKind::Projects => {
            let raw = with_config_defaults(&paths, raw)?;
            apply_to::<ProjectsState>(&paths, kind, &raw)
        }
        DocumentKind::Inbox => apply_to::<InboxState>(&paths, kind, raw),
        DocumentKind::Wbs => apply_to::<WbsState>(&paths, kind, raw),
    }
}

/// Seed a `CREATE_PROJECT` input with the `[defaults]` section from
/// `config.toml` when the action carries no config. An explicit config in
/// the action is left alone.
fn with_config_defaults(paths: &DeskPaths, raw: &Value) -> Result<Value> {
    let is_create = raw.get("type").and_then(Value::as_str) == Some("CREATE_PROJECT");
    let has_config = raw
        .pointer("/input/config")
        .is_some_and(|config| !config.is_null());
    if !is_create || has_config {
        return Ok(raw.clone());
    }

    let defaults = load_config(&paths.config_path)
        .with_context(|| "load config.toml")?
        .defaults;
    let config = documents::projects::state::ProjectConfig {
        ports: defaults.ports,
        timeout_secs: defaults.timeout_secs,
        auto_start: defaults.auto_start,
    };
    let mut raw = raw.clone();
    if let Some(Value::Object(input)) = raw.pointer_mut("/input") {
        input.insert(
            "config".to_string(),
            serde_json::to_value(&config).context("serialize project config")?,
        );
    }
    Ok(raw)
}

fn apply_to<M: DocumentModel>(
    paths: &DeskPaths,
    kind: DocumentKind,
    raw: &Value,
) -> Result<ApplyOutcome> {
    check_action::<M>(raw)?;
    let action: M::Action = serde_json::from_value(raw.clone()).context("deserialize action")?;

    let path = paths.document_path(kind);
    let mut doc = load_document::<M>(path)?;
    if let Err(err) = doc.apply(&action) {
        return Ok(ApplyOutcome::Rejected {
            kind,
            message: err.to_string(),
        });
    }
    write_document(path, &doc)?;

    let action_type = doc
        .history
        .last()
        .map(|record| record.action_type.clone())
        .unwrap_or_default();
    info!(kind = kind.as_str(), action = %action_type, revision = doc.header.revision, "action applied");
    Ok(ApplyOutcome::Applied {
        kind,
        action_type,
        revision: doc.header.revision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::init::{InitOptions, init_desk};
    use serde_json::json;

    fn add_message(id: &str) -> Value {
        json!({
            "type": "ADD_MESSAGE",
            "input": {
                "id": id,
                "sender": "USER",
                "content": "hello",
                "timestamp": "2026-08-24T10:00:00Z"
            }
        })
    }

    /// A valid action commits, bumps revision, and records the wire type.
    #[test]
    fn valid_action_applies_and_saves() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_desk(temp.path(), &InitOptions { force: false }).expect("init");

        let outcome =
            apply_action(temp.path(), DocumentKind::Chat, &add_message("m-1")).expect("apply");
        assert_eq!(
            outcome,
            ApplyOutcome::Applied {
                kind: DocumentKind::Chat,
                action_type: "ADD_MESSAGE".to_string(),
                revision: 1,
            }
        );

        let paths = DeskPaths::new(temp.path());
        let doc = load_document::<ChatState>(&paths.chat_path).expect("load");
        assert_eq!(doc.state.messages.len(), 1);
    }

    /// A reducer rejection reports Rejected and leaves the file byte-identical.
    #[test]
    fn rejected_action_leaves_file_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_desk(temp.path(), &InitOptions { force: false }).expect("init");

        apply_action(temp.path(), DocumentKind::Chat, &add_message("m-1")).expect("apply");
        let before = std::fs::read(&paths.chat_path).expect("read");

        let outcome =
            apply_action(temp.path(), DocumentKind::Chat, &add_message("m-1")).expect("apply");
        match outcome {
            ApplyOutcome::Rejected { message, .. } => {
                assert!(message.contains("m-1"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        let after = std::fs::read(&paths.chat_path).expect("read");
        assert_eq!(before, after);
    }

    /// Unknown action types fail the schema gate before touching the document.
    #[test]
    fn unknown_action_type_is_invalid() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_desk(temp.path(), &InitOptions { force: false }).expect("init");

        let raw = json!({"type": "SHRED_CHAT", "input": {}});
        let err = apply_action(temp.path(), DocumentKind::Chat, &raw).unwrap_err();
        assert!(err.to_string().contains("action schema validation failed"));
    }

    /// Missing required input fields fail the schema gate.
    #[test]
    fn malformed_input_is_invalid() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_desk(temp.path(), &InitOptions { force: false }).expect("init");

        let raw = json!({"type": "ADD_MESSAGE", "input": {"id": "m-1"}});
        let err = apply_action(temp.path(), DocumentKind::Chat, &raw).unwrap_err();
        assert!(err.to_string().contains("action schema validation failed"));
    }
}
