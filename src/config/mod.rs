//! Configuration management for repo-sweep
//!
//! This module handles loading, validation, and management of all configuration.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database holding the repos to walk
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Default execution options for batch runs
    #[serde(default)]
    pub batch: BatchConfig,
    /// Output location for generated files
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SweepError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| SweepError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::default().with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.database
            .validate()
            .map_err(|e| SweepError::Config(format!("Database config error: {}", e)))?;

        self.batch
            .validate()
            .map_err(|e| SweepError::Config(format!("Batch config error: {}", e)))?;

        self.output
            .validate()
            .map_err(|e| SweepError::Config(format!("Output config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| SweepError::Config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SweepError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
