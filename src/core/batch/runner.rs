//! Batch entry point: selection, throttled and isolated workers, aggregation

use super::aggregator::{AggregatedReport, MetaReducer, MetaTally};
use super::cancel::CancelToken;
use super::isolator::FailureIsolator;
use super::options::ExecutionOptions;
use super::outcome::Outcome;
use super::scheduler::ConcurrencyScheduler;
use super::source::EntitySource;
use super::throttle::RateThrottle;
use crate::utils::error::Result;
use std::future::Future;
use tracing::{info, warn};

/// Runs a unit of work over every entity a source selects
pub struct BatchRunner<'a, S: EntitySource + ?Sized> {
    source: &'a S,
    options: ExecutionOptions,
    cancel: CancelToken,
}

impl<'a, S: EntitySource + ?Sized> BatchRunner<'a, S> {
    pub fn new(source: &'a S, options: ExecutionOptions) -> Self {
        Self {
            source,
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Thread an external cancellation signal through the run
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Run and aggregate with the default metadata tally
    pub async fn run<T, F, Fut>(&self, work: F) -> Result<AggregatedReport<T>>
    where
        F: Fn(S::Entity, usize) -> Fut,
        Fut: Future<Output = anyhow::Result<Outcome<T>>>,
    {
        self.run_with::<MetaTally, T, F, Fut>(work).await
    }

    /// Run and aggregate with a caller-chosen metadata reduction
    pub async fn run_with<R, T, F, Fut>(&self, work: F) -> Result<AggregatedReport<T, R>>
    where
        R: MetaReducer,
        F: Fn(S::Entity, usize) -> Fut,
        Fut: Future<Output = anyhow::Result<Outcome<T>>>,
    {
        let outcomes = self.outcomes(work).await?;
        Ok(AggregatedReport::from_outcomes(outcomes))
    }

    /// Run and return one outcome per selected identifier, in selection order
    pub async fn outcomes<T, F, Fut>(&self, work: F) -> Result<Vec<Outcome<T>>>
    where
        F: Fn(S::Entity, usize) -> Fut,
        Fut: Future<Output = anyhow::Result<Outcome<T>>>,
    {
        let selection = self.options.selection();
        let ids = self.source.resolve_identifiers(&selection).await?;
        if ids.is_empty() {
            warn!(
                name = selection.name.as_deref().unwrap_or("<none>"),
                limit = selection.limit,
                skip = selection.skip,
                "No entities found for selection"
            );
        }

        info!(total = ids.len(), "Processing {} items...", ids.len());

        let throttle = RateThrottle::new(self.options.throttle_interval(), self.cancel.clone());
        let isolator = FailureIsolator::new(self.source, &throttle, self.options.fail_fast());
        let scheduler = ConcurrencyScheduler::new(self.options.concurrency(), self.cancel.clone());

        let (isolator, work) = (&isolator, &work);
        let outcomes = scheduler
            .run(&ids, move |index, id| isolator.process(index, id, work))
            .await?;

        info!(total = outcomes.len(), "Processed {} items", outcomes.len());
        Ok(outcomes)
    }
}

/// Run `work` over `source` with `options` and return the aggregated report
///
/// Fails only when an identifier cannot be resolved, or when `fail_fast` is
/// set and a unit of work fails.
pub async fn run_batch<S, T, F, Fut>(
    source: &S,
    work: F,
    options: &ExecutionOptions,
) -> Result<AggregatedReport<T>>
where
    S: EntitySource + ?Sized,
    F: Fn(S::Entity, usize) -> Fut,
    Fut: Future<Output = anyhow::Result<Outcome<T>>>,
{
    BatchRunner::new(source, options.clone()).run(work).await
}
