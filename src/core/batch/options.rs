//! Execution options for a batch run

use crate::utils::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Validated configuration for one batch run
///
/// Defaults: `limit = 0` (unlimited), `skip = 0`, no name filter,
/// `concurrency = 1`, no throttle, `fail_fast = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    limit: u64,
    skip: u64,
    name_filter: Option<String>,
    concurrency: NonZeroUsize,
    throttle_interval: Duration,
    fail_fast: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            skip: 0,
            name_filter: None,
            concurrency: NonZeroUsize::MIN,
            throttle_interval: Duration::ZERO,
            fail_fast: false,
        }
    }
}

impl ExecutionOptions {
    /// Start building a set of options from the defaults
    pub fn builder() -> ExecutionOptionsBuilder {
        ExecutionOptionsBuilder::default()
    }

    /// Maximum number of identifiers to process, 0 meaning unlimited
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of leading identifiers to omit
    pub fn skip(&self) -> u64 {
        self.skip
    }

    /// Exact-match name filter
    pub fn name_filter(&self) -> Option<&str> {
        self.name_filter.as_deref()
    }

    /// Maximum simultaneous units of work
    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    /// Minimum spacing between two unit-of-work starts
    pub fn throttle_interval(&self) -> Duration {
        self.throttle_interval
    }

    /// Whether a unit-of-work failure aborts the run
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Selection window handed to the entity source
    pub fn selection(&self) -> Selection {
        Selection {
            limit: self.limit,
            skip: self.skip,
            name: self.name_filter.clone(),
        }
    }
}

/// Builder for [`ExecutionOptions`]
///
/// Concurrency is kept raw until `build()` so that a zero value is
/// rejected instead of silently clamped.
#[derive(Debug, Clone)]
pub struct ExecutionOptionsBuilder {
    limit: u64,
    skip: u64,
    name_filter: Option<String>,
    concurrency: usize,
    throttle_interval: Duration,
    fail_fast: bool,
}

impl Default for ExecutionOptionsBuilder {
    fn default() -> Self {
        Self {
            limit: 0,
            skip: 0,
            name_filter: None,
            concurrency: 1,
            throttle_interval: Duration::ZERO,
            fail_fast: false,
        }
    }
}

impl ExecutionOptionsBuilder {
    /// Set the maximum number of identifiers (0 = unlimited)
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the number of leading identifiers to omit
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Narrow the selection to one named entity
    pub fn name_filter(mut self, name: Option<impl Into<String>>) -> Self {
        self.name_filter = name.map(Into::into);
        self
    }

    /// Set the concurrency limit (must be at least 1)
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the minimum spacing between starts
    pub fn throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    /// Set the minimum spacing between starts, in milliseconds
    pub fn throttle_interval_ms(self, millis: u64) -> Self {
        self.throttle_interval(Duration::from_millis(millis))
    }

    /// Promote unit-of-work failures to run-aborting errors
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Validate and build the options
    pub fn build(self) -> Result<ExecutionOptions> {
        let concurrency = NonZeroUsize::new(self.concurrency).ok_or_else(|| {
            SweepError::invalid_options(format!(
                "concurrency must be at least 1, got {}",
                self.concurrency
            ))
        })?;

        if matches!(&self.name_filter, Some(name) if name.trim().is_empty()) {
            return Err(SweepError::invalid_options("name filter must not be blank"));
        }

        Ok(ExecutionOptions {
            limit: self.limit,
            skip: self.skip,
            name_filter: self.name_filter,
            concurrency,
            throttle_interval: self.throttle_interval,
            fail_fast: self.fail_fast,
        })
    }
}

/// Pagination and filter window resolved by an entity source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Maximum number of identifiers, 0 meaning unlimited
    pub limit: u64,
    /// Number of leading identifiers to omit
    pub skip: u64,
    /// Exact-match name filter
    pub name: Option<String>,
}
