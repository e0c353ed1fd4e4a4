//! Stable exit codes for desk CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/schema/invariants or other errors.
pub const INVALID: i32 = 1;
/// `desk apply` was rejected by a reducer precondition.
pub const REJECTED: i32 = 2;
/// `desk reconcile --dry-run` found pending transitions.
pub const DIVERGED: i32 = 3;
