//! Console application for the agent-management desk.
//!
//! State lives in four reducer-driven documents (see the `documents` crate);
//! this crate owns everything around them:
//!
//! - **[`io`]**: Side-effecting operations (filesystem store, TOML config,
//!   process supervision). Isolated to enable scripted doubles in tests.
//! - **Orchestration ([`apply`], [`validate`], [`show`], [`reconcile`])**:
//!   coordinates documents with I/O to implement CLI commands.
//!
//! The only module that touches processes through anything but the
//! [`io::supervisor::ProjectLauncher`] trait is `io::process` itself.

pub mod apply;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod reconcile;
pub mod show;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
