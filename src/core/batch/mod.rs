//! Batch iteration engine
//!
//! Walks the identifiers an [`EntitySource`] selects and applies a caller
//! supplied unit of work to each entity, with a cap on in-flight work, a
//! shared cap on the rate of starts, and per-item failure isolation. The
//! per-item outcomes are folded into one [`AggregatedReport`].

mod aggregator;
mod cancel;
mod isolator;
mod options;
mod outcome;
mod runner;
mod scheduler;
mod source;
mod throttle;


pub use aggregator::{AggregatedReport, MetaReducer, MetaTally, Summary, aggregate};
pub use cancel::CancelToken;
pub use isolator::FailureIsolator;
pub use options::{ExecutionOptions, ExecutionOptionsBuilder, Selection};
pub use outcome::{ERROR_KEY, Meta, MetaValue, Outcome};
pub use runner::{BatchRunner, run_batch};
pub use scheduler::ConcurrencyScheduler;
pub use source::EntitySource;
pub use throttle::RateThrottle;
