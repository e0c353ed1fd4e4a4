//! Document models for the agent desk.
//!
//! Four document types share one scaffold: a serde state object, a tagged
//! action union with validated inputs, a reducer dispatching each action to
//! an operation function that mutates state, and a closed set of typed
//! errors raised on precondition failure.
//!
//! - **[`chat`]**: conversation with the AI agent.
//! - **[`projects`]**: tracked local agent processes with targeted vs.
//!   current status and a pure reconciliation planner.
//! - **[`inbox`]**: stakeholder registry and resolution-workflow threads.
//! - **[`wbs`]**: work-breakdown-structure goal list.
//!
//! [`document`] wraps a model in an envelope that applies actions
//! transactionally (state commits only when the reducer succeeds) and keeps
//! the operation history. [`schema`] holds the embedded JSON Schemas that
//! validate persisted documents and incoming action payloads.
//!
//! Everything here is pure and synchronous — no I/O, fully testable in
//! isolation. Persistence and process supervision live in the `desk` crate.

pub mod chat;
pub mod document;
pub mod inbox;
pub mod projects;
pub mod schema;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod wbs;
