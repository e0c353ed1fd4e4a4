//! Agent conversation document: a titled, ordered message log.

pub mod actions;
pub mod error;
pub mod invariants;
pub mod reducer;
pub mod state;
