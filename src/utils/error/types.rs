//! Error types for repo-sweep

use thiserror::Error;

/// Result type alias for repo-sweep
pub type Result<T> = std::result::Result<T, SweepError>;

/// Main error type for repo-sweep
///
/// Only `EntityNotFound`, `UnitOfWork` (fail-fast runs) and `Cancelled` ever
/// escape a batch run; everything else comes from the surrounding layers.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected execution options
    #[error("Invalid execution options: {0}")]
    InvalidOptions(String),

    /// An identifier resolved to no stored entity
    #[error("Entity not found by id: {id}")]
    EntityNotFound { id: String },

    /// A unit of work failed in a fail-fast run
    #[error("Error processing {label} (id: {id})")]
    UnitOfWork {
        id: String,
        label: String,
        #[source]
        source: anyhow::Error,
    },

    /// The run was cancelled before every item was admitted
    #[error("Batch cancelled")]
    Cancelled,

    /// Unknown task name
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
