//! Error handling for repo-sweep
//!
//! This module defines the error type shared by the batch core, storage and tasks.

mod helpers;
mod types;

pub use types::{Result, SweepError};
