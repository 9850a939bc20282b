// Module declarations
mod connection;
mod repo_ops;
mod source;
mod types;

// Re-export public types
pub use types::{RepoRecord, SeaOrmDatabase};
