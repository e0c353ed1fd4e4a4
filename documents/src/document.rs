//! Document envelope: header, operation history, transactional apply.
//!
//! The envelope implements the dispatch contract the reducers rely on: an
//! action runs against a scratch clone of the state, and only a successful
//! reduction is committed (revision bump, `lastModified` stamp, history
//! record). A rejected action leaves the document byte-identical.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contract each document state type implements.
///
/// `reduce` is the switch over the action union; it must either complete the
/// mutation or return a typed error without caring about rollback — the
/// envelope discards the scratch state on error.
pub trait DocumentModel: Clone + Default + Serialize + DeserializeOwned {
    /// Tagged action union for this document.
    type Action: Serialize + DeserializeOwned;
    /// Closed set of precondition failures this document's reducer raises.
    type Error: std::error::Error;

    /// Wire name of the document type (`"chat"`, `"projects"`, ...).
    const DOCUMENT_TYPE: &'static str;

    fn reduce(state: &mut Self, action: &Self::Action) -> Result<(), Self::Error>;

    /// Semantic invariants not expressible in the JSON Schema.
    ///
    /// Violations are reported, not rejected: reducers enforce only their
    /// own preconditions, and `desk validate` surfaces everything else.
    fn invariants(state: &Self) -> Vec<String>;
}

/// Envelope metadata shared by every document type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    /// Stable document identifier.
    pub id: String,
    /// Wire name of the document type; must match the state it wraps.
    pub document_type: String,
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    /// Number of operations applied so far (0 for a fresh document).
    pub revision: u64,
}

/// One successfully applied operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    /// 1-based; equals the revision the operation produced.
    pub index: u64,
    /// Wire action type string, e.g. `ADD_STAKEHOLDER`.
    pub action_type: String,
    /// Raw input payload as dispatched.
    pub input: Value,
    pub timestamp: DateTime<Utc>,
}

/// A document: envelope header, model state, applied-operation history.
///
/// `bound = ""` keeps the derive from adding its own `M: Deserialize<'de>`
/// bound, which would compete with the `DeserializeOwned` bound already on
/// [`DocumentModel`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Document<M: DocumentModel> {
    pub header: DocumentHeader,
    pub state: M,
    pub history: Vec<OperationRecord>,
}

impl<M: DocumentModel> Document<M> {
    /// Create a fresh document with the model's default state.
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            header: DocumentHeader {
                id: id.into(),
                document_type: M::DOCUMENT_TYPE.to_string(),
                created: now,
                last_modified: now,
                revision: 0,
            },
            state: M::default(),
            history: Vec::new(),
        }
    }

    /// Apply one action through the model's reducer.
    ///
    /// On success commits the mutated state, increments the revision and
    /// appends an [`OperationRecord`]. On failure returns the reducer's
    /// typed error and leaves state, revision and history untouched.
    pub fn apply(&mut self, action: &M::Action) -> Result<(), M::Error> {
        let mut next = self.state.clone();
        M::reduce(&mut next, action)?;

        let now = Utc::now();
        let (action_type, input) = wire_parts(action);
        self.state = next;
        self.header.revision += 1;
        self.header.last_modified = now;
        self.history.push(OperationRecord {
            index: self.header.revision,
            action_type,
            input,
            timestamp: now,
        });
        Ok(())
    }

    /// Envelope + model invariants, as human-readable violation messages.
    pub fn invariants(&self) -> Vec<String> {
        let mut errors = self.envelope_invariants();
        errors.extend(M::invariants(&self.state));
        errors
    }

    /// Envelope-only invariants: header/revision/history consistency.
    ///
    /// These flag a corrupt or hand-edited file, never a state a reducer can
    /// legitimately produce, so loads may fail hard on them while state
    /// invariant reports stay advisory.
    pub fn envelope_invariants(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.header.document_type != M::DOCUMENT_TYPE {
            errors.push(format!(
                "header documentType '{}' does not match state type '{}'",
                self.header.document_type,
                M::DOCUMENT_TYPE
            ));
        }
        if self.header.revision != self.history.len() as u64 {
            errors.push(format!(
                "revision {} does not match history length {}",
                self.header.revision,
                self.history.len()
            ));
        }
        for (position, record) in self.history.iter().enumerate() {
            let expected = position as u64 + 1;
            if record.index != expected {
                errors.push(format!(
                    "history record at position {} has index {} (expected {})",
                    position, record.index, expected
                ));
            }
        }
        if self.header.last_modified < self.header.created {
            errors.push("lastModified precedes created".to_string());
        }
        errors
    }
}

/// Split a serialized action into its wire `type` string and `input` payload.
fn wire_parts(action: &impl Serialize) -> (String, Value) {
    let mut fields = match serde_json::to_value(action) {
        Ok(Value::Object(fields)) => fields,
        _ => return ("UNKNOWN".to_string(), Value::Null),
    };
    let action_type = match fields.remove("type") {
        Some(Value::String(name)) => name,
        _ => "UNKNOWN".to_string(),
    };
    let input = fields.remove("input").unwrap_or(Value::Null);
    (action_type, input)
}
