//! Configuration loading utilities
//!
//! Overlays `SWEEP_*` environment variables on top of a configuration.

use super::Config;
use crate::utils::error::{Result, SweepError};
use std::env;
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply environment variable overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        debug!("Applying configuration from environment variables");

        if let Ok(url) = env::var("SWEEP_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(max) = parse_var("SWEEP_DATABASE_MAX_CONNECTIONS")? {
            self.database.max_connections = max;
        }
        if let Ok(directory) = env::var("SWEEP_OUTPUT_DIR") {
            self.output.directory = directory;
        }
        if let Some(concurrency) = parse_var("SWEEP_CONCURRENCY")? {
            self.batch.concurrency = concurrency;
        }
        if let Some(interval) = parse_var("SWEEP_THROTTLE_INTERVAL_MS")? {
            self.batch.throttle_interval_ms = interval;
        }
        if let Some(fail_fast) = parse_var("SWEEP_FAIL_FAST")? {
            self.batch.fail_fast = fail_fast;
        }
        if let Ok(level) = env::var("SWEEP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = parse_var("SWEEP_LOG_FORMAT")? {
            self.logging.format = format;
        }

        Ok(self)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SweepError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(None),
    }
}
