//! Bounded worker pool over an ordered item list

use super::cancel::CancelToken;
use crate::utils::error::{Result, SweepError};
use futures::future::try_join_all;
use parking_lot::Mutex;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Runs at most `concurrency` workers at once over a shared queue cursor
///
/// Results are stored by input position, so output order never depends on
/// completion order. Workers are polled cooperatively on the calling task.
#[derive(Debug, Clone)]
pub struct ConcurrencyScheduler {
    concurrency: NonZeroUsize,
    cancel: CancelToken,
}

impl ConcurrencyScheduler {
    pub fn new(concurrency: NonZeroUsize, cancel: CancelToken) -> Self {
        Self {
            concurrency,
            cancel,
        }
    }

    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    /// Apply `worker` to every item, returning one result per item in input order
    ///
    /// A fail-fast unit-of-work error (or cancellation) halts admission: no
    /// further item starts, items already admitted run to completion, then
    /// that error is returned. Any other error, such as an entity that cannot
    /// be resolved, aborts the run at once and drops the items in flight.
    pub async fn run<I, T, F, Fut>(&self, items: &[I], worker: F) -> Result<Vec<T>>
    where
        I: Clone,
        F: Fn(usize, I) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = AtomicUsize::new(0);
        let halted = AtomicBool::new(false);
        let slots: Mutex<Vec<Option<T>>> = Mutex::new((0..items.len()).map(|_| None).collect());
        let first_error: Mutex<Option<SweepError>> = Mutex::new(None);

        let pool_size = self.concurrency.get().min(items.len());
        let workers = (0..pool_size).map(|_| {
            let (cursor, halted, slots, first_error, worker) =
                (&cursor, &halted, &slots, &first_error, &worker);

            async move {
                loop {
                    if halted.load(Ordering::Acquire) || self.cancel.is_cancelled() {
                        break;
                    }

                    let index = cursor.fetch_add(1, Ordering::AcqRel);
                    let Some(item) = items.get(index) else {
                        break;
                    };

                    match worker(index, item.clone()).await {
                        Ok(value) => slots.lock()[index] = Some(value),
                        Err(err) if err.drains_in_flight() => {
                            halted.store(true, Ordering::Release);
                            let mut first = first_error.lock();
                            if first.is_none() {
                                *first = Some(err);
                            }
                            break;
                        }
                        Err(err) => {
                            halted.store(true, Ordering::Release);
                            return Err(err);
                        }
                    }
                }
                Ok::<(), SweepError>(())
            }
        });

        // The first aborting error drops every other worker
        try_join_all(workers).await?;

        if let Some(err) = first_error.into_inner() {
            return Err(err);
        }

        // Only cancellation leaves a slot unfilled without recording an error
        slots
            .into_inner()
            .into_iter()
            .collect::<Option<Vec<T>>>()
            .ok_or(SweepError::Cancelled)
    }
}
