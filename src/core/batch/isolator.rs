//! Per-item failure isolation

use super::outcome::Outcome;
use super::source::EntitySource;
use super::throttle::RateThrottle;
use crate::utils::error::{Result, SweepError};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error};

/// Two-stage boundary around one item
///
/// Entity resolution is never isolated. The unit of work is: its errors
/// (and panics) become a `Failure` outcome unless the run is fail-fast.
pub struct FailureIsolator<'a, S: EntitySource + ?Sized> {
    source: &'a S,
    throttle: &'a RateThrottle,
    fail_fast: bool,
}

impl<'a, S: EntitySource + ?Sized> FailureIsolator<'a, S> {
    pub fn new(source: &'a S, throttle: &'a RateThrottle, fail_fast: bool) -> Self {
        Self {
            source,
            throttle,
            fail_fast,
        }
    }

    /// Resolve `id` and run `work` on the entity at position `index`
    pub async fn process<T, F, Fut>(&self, index: usize, id: S::Id, work: &F) -> Result<Outcome<T>>
    where
        F: Fn(S::Entity, usize) -> Fut,
        Fut: Future<Output = anyhow::Result<Outcome<T>>>,
    {
        let entity = self.source.resolve_entity(&id).await?;
        let label = self.source.entity_label(&entity);

        debug!(index = index + 1, id = %id, entity = %label, "Processing item");
        self.throttle.acquire().await?;

        let result = AssertUnwindSafe(async { work(entity, index).await })
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(anyhow::anyhow!(
                    "unit of work panicked: {}",
                    panic_message(panic.as_ref())
                ))
            });

        match result {
            Ok(outcome) => {
                debug!(
                    index = index + 1,
                    entity = %label,
                    success = outcome.is_success(),
                    meta = ?outcome.meta(),
                    "Processed item"
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(
                    index = index + 1,
                    id = %id,
                    entity = %label,
                    error = %format!("{err:#}"),
                    "Error processing item"
                );
                if self.fail_fast {
                    Err(SweepError::unit_of_work(&id, label, err))
                } else {
                    Ok(Outcome::failure())
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
