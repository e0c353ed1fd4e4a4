//! Semantic invariants for the inbox document.

use crate::inbox::state::{InboxState, ThreadStatus};
use std::collections::HashSet;

/// Check semantic invariants not expressible in JSON Schema:
/// - No duplicate stakeholder/thread ids
/// - Thread stakeholder references resolve
/// - Message ids unique within each thread
/// - Threads of removed stakeholders are archived
pub fn validate(state: &InboxState) -> Vec<String> {
    let mut errors = Vec::new();

    let mut stakeholder_ids = HashSet::new();
    for stakeholder in &state.stakeholders {
        if !stakeholder_ids.insert(stakeholder.id.as_str()) {
            errors.push(format!("duplicate stakeholder id '{}'", stakeholder.id));
        }
    }

    let mut thread_ids = HashSet::new();
    for thread in &state.threads {
        if !thread_ids.insert(thread.id.as_str()) {
            errors.push(format!("duplicate thread id '{}'", thread.id));
        }

        match state.find_stakeholder(&thread.stakeholder) {
            None => errors.push(format!(
                "thread '{}' references unknown stakeholder '{}'",
                thread.id, thread.stakeholder
            )),
            Some(stakeholder) => {
                if stakeholder.removed && thread.status != ThreadStatus::Archived {
                    errors.push(format!(
                        "thread '{}' of removed stakeholder '{}' is not archived",
                        thread.id, thread.stakeholder
                    ));
                }
            }
        }

        let mut message_ids = HashSet::new();
        for message in &thread.messages {
            if !message_ids.insert(message.id.as_str()) {
                errors.push(format!(
                    "duplicate message id '{}' in thread '{}'",
                    message.id, thread.id
                ));
            }
        }
    }

    errors
}
