//! Storage layer for repo-sweep
//!
//! This module provides the repo database and JSON file output.

/// Database storage module
pub mod database;
/// JSON file output module
pub mod files;

pub use database::{Database, RepoRecord};
pub use files::JsonWriter;
