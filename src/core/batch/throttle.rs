//! Global start-rate throttle
//!
//! One gate is shared by every worker of a run: at most one unit of work may
//! start per interval, however many are allowed to run at once.

use super::cancel::CancelToken;
use crate::utils::error::{Result, SweepError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

/// Strict start gate: each grant comes at least `interval` after the previous one
///
/// The window restarts at every grant, so a start that comes late (after a
/// slow item or an idle slot) never lets the following one through early.
#[derive(Debug)]
pub struct RateThrottle {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
    cancel: CancelToken,
}

impl RateThrottle {
    /// Create a throttle; a zero interval yields a pass-through gate
    pub fn new(interval: Duration, cancel: CancelToken) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
            cancel,
        }
    }

    /// Pass-through throttle
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO, CancelToken::new())
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }

    /// Wait until a start is allowed and return the instant it was granted
    ///
    /// Waiters queue on the gate in arrival order. Returns
    /// `SweepError::Cancelled` if the run is cancelled while waiting.
    pub async fn acquire(&self) -> Result<Instant> {
        if !self.is_enabled() {
            return Ok(Instant::now());
        }

        let mut last_start = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(SweepError::Cancelled),
            guard = self.last_start.lock() => guard,
        };

        if let Some(previous) = *last_start {
            let ready_at = previous + self.interval;
            let now = Instant::now();
            if ready_at > now {
                trace!(
                    wait_ms = (ready_at - now).as_millis() as u64,
                    "Reached interval limit, call is delayed"
                );

                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(SweepError::Cancelled),
                    _ = sleep_until(ready_at) => {}
                }
            }
        }

        let granted = Instant::now();
        *last_start = Some(granted);
        Ok(granted)
    }
}
