//! Work-breakdown-structure document: a flat ordered list of goals whose
//! `parentId` references form a tree, with dependencies, a status lifecycle
//! and soft-deletion cascades.

pub mod actions;
pub mod error;
pub mod invariants;
pub mod reducer;
pub mod state;
