//! Embedded JSON Schemas and validation helpers.
//!
//! Each document type carries two schemas: one for the persisted document
//! (envelope + state) and one for its action union. Raw JSON is validated
//! here before serde gets to see it, so wire errors surface as schema
//! violations instead of deserialization failures.

use jsonschema::Draft;
use serde_json::Value;

const CHAT_SCHEMA: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../schemas/chat.schema.json"));
const CHAT_ACTIONS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/chat_actions.schema.json"
));
const PROJECTS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/projects.schema.json"
));
const PROJECTS_ACTIONS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/projects_actions.schema.json"
));
const INBOX_SCHEMA: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../schemas/inbox.schema.json"));
const INBOX_ACTIONS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/inbox_actions.schema.json"
));
const WBS_SCHEMA: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../schemas/wbs.schema.json"));
const WBS_ACTIONS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/wbs_actions.schema.json"
));

/// The four document types, by wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Chat,
    Projects,
    Inbox,
    Wbs,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Chat,
        DocumentKind::Projects,
        DocumentKind::Inbox,
        DocumentKind::Wbs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Chat => "chat",
            DocumentKind::Projects => "projects",
            DocumentKind::Inbox => "inbox",
            DocumentKind::Wbs => "wbs",
        }
    }

    pub fn parse(name: &str) -> Option<DocumentKind> {
        match name {
            "chat" => Some(DocumentKind::Chat),
            "projects" => Some(DocumentKind::Projects),
            "inbox" => Some(DocumentKind::Inbox),
            "wbs" => Some(DocumentKind::Wbs),
            _ => None,
        }
    }

    /// Schema for the persisted document (envelope + state).
    pub fn document_schema(self) -> &'static str {
        match self {
            DocumentKind::Chat => CHAT_SCHEMA,
            DocumentKind::Projects => PROJECTS_SCHEMA,
            DocumentKind::Inbox => INBOX_SCHEMA,
            DocumentKind::Wbs => WBS_SCHEMA,
        }
    }

    /// Schema for the document's tagged action union.
    pub fn actions_schema(self) -> &'static str {
        match self {
            DocumentKind::Chat => CHAT_ACTIONS_SCHEMA,
            DocumentKind::Projects => PROJECTS_ACTIONS_SCHEMA,
            DocumentKind::Inbox => INBOX_ACTIONS_SCHEMA,
            DocumentKind::Wbs => WBS_ACTIONS_SCHEMA,
        }
    }
}

/// Validate a persisted document against its schema.
pub fn validate_document(kind: DocumentKind, instance: &Value) -> Result<(), Vec<String>> {
    validate(instance, kind.document_schema())
}

/// Validate raw action JSON against the document's action union schema.
pub fn validate_action(kind: DocumentKind, instance: &Value) -> Result<(), Vec<String>> {
    validate(instance, kind.actions_schema())
}

/// Validate a JSON instance against a schema (Draft 2020-12).
///
/// Returns every violation message; the embedded schemas themselves failing
/// to compile is reported the same way rather than panicking.
fn validate(instance: &Value, schema_raw: &str) -> Result<(), Vec<String>> {
    let schema: Value = match serde_json::from_str(schema_raw) {
        Ok(value) => value,
        Err(err) => return Err(vec![format!("invalid schema json: {err}")]),
    };
    let compiled = match jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
    {
        Ok(validator) => validator,
        Err(err) => return Err(vec![format!("invalid schema: {err}")]),
    };

    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if messages.is_empty() { Ok(()) } else { Err(messages) }
}
