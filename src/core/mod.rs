//! Core functionality for repo-sweep
//!
//! The batch engine and the tasks built on top of it.

pub mod batch;
pub mod tasks;
