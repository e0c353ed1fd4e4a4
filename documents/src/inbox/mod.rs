//! Stakeholder inbox: registry of stakeholders plus discussion threads
//! with a propose/confirm resolution workflow.
//!
//! Stakeholders are soft-deleted (flagged `removed`, never dropped) so that
//! historical threads keep resolving their references; removal cascades by
//! archiving the stakeholder's threads.

pub mod actions;
pub mod error;
pub mod invariants;
pub mod reducer;
pub mod state;
