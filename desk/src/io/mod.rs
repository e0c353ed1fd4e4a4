//! I/O helpers for desk commands.

pub mod config;
pub mod init;
pub mod pidfile;
pub mod process;
pub mod store;
pub mod supervisor;
