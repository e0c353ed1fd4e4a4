//! Tracked agent processes with targeted/current status reconciliation.
//!
//! Each project records two statuses: `targetedStatus` is what the operator
//! asked for, `currentStatus` is what was last observed. Reducer actions move
//! the target; only observation feedback (`SET_PROJECT_STATUS`) moves the
//! current status. [`reconcile`] derives the transitions that converge one
//! toward the other without performing any I/O itself.

pub mod actions;
pub mod error;
pub mod invariants;
pub mod reconcile;
pub mod reducer;
pub mod state;
