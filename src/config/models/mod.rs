//! Configuration data models
//!
//! This module defines all configuration structures used by repo-sweep.

pub mod batch;
pub mod database;
pub mod logging;
pub mod output;

// Re-export all configuration types
pub use batch::*;
pub use database::*;
pub use logging::*;
pub use output::*;

/// Default database URL
pub fn default_database_url() -> String {
    "sqlite://data/repos.db?mode=rwc".to_string()
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    5
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default concurrency for batch runs
pub fn default_concurrency() -> usize {
    1
}

/// Default output directory for generated JSON files
pub fn default_output_directory() -> String {
    "build".to_string()
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
