//! # repo-sweep
//!
//! Batch runner over a catalog of stored repositories.
//!
//! ## Features
//!
//! - **Bounded concurrency**: at most N units of work in flight
//! - **Start-rate throttle**: one shared gate spaces out every start
//! - **Failure isolation**: a failing item becomes a `Failure` outcome instead of aborting the run
//! - **Ordered aggregation**: payloads come back in selection order with a metadata summary
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repo_sweep::config::DatabaseConfig;
//! use repo_sweep::storage::Database;
//! use repo_sweep::{ExecutionOptions, Outcome, run_batch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let database = Database::new(&DatabaseConfig::default()).await?;
//!     let options = ExecutionOptions::builder().concurrency(4).build()?;
//!
//!     let report = run_batch(
//!         &database,
//!         |record, _index| async move { Ok(Outcome::success(record.repo.stars)) },
//!         &options,
//!     )
//!     .await?;
//!
//!     println!("{} repos, {} failed", report.summary.total, report.summary.failure_count);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, SweepError};

// Export the batch engine
pub use core::batch::{
    AggregatedReport, BatchRunner, CancelToken, EntitySource, ExecutionOptions, Meta, MetaValue,
    Outcome, Selection, Summary, run_batch,
};
pub use core::tasks::{Task, TaskContext, TaskRegistry, TaskReport};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
