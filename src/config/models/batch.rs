//! Batch execution configuration

use super::*;
use crate::core::batch::ExecutionOptions;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Serialized form of the execution options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of repos to process (0 = unlimited)
    #[serde(default)]
    pub limit: u64,
    /// Number of leading repos to skip
    #[serde(default)]
    pub skip: u64,
    /// Only process the repo with this full name
    #[serde(default)]
    pub name: Option<String>,
    /// Maximum simultaneous units of work
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Minimum spacing between two starts, in milliseconds
    #[serde(default)]
    pub throttle_interval_ms: u64,
    /// Abort the run on the first failing item
    #[serde(default)]
    pub fail_fast: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            skip: 0,
            name: None,
            concurrency: default_concurrency(),
            throttle_interval_ms: 0,
            fail_fast: false,
        }
    }
}

impl BatchConfig {
    /// Validated execution options
    pub fn to_options(&self) -> Result<ExecutionOptions> {
        ExecutionOptions::builder()
            .limit(self.limit)
            .skip(self.skip)
            .name_filter(self.name.clone())
            .concurrency(self.concurrency)
            .throttle_interval_ms(self.throttle_interval_ms)
            .fail_fast(self.fail_fast)
            .build()
    }

}
