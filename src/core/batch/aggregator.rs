//! Folding outcomes into the run report

use super::outcome::{ERROR_KEY, Meta, MetaValue, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Caller-defined reduction over outcome metadata
pub trait MetaReducer: Default {
    /// Fold one outcome's metadata into the running state
    fn observe(&mut self, meta: &Meta, success: bool);
}

/// Default reduction: counts true flags, sums numbers, collects distinct strings
///
/// The `error` flag is left out since the summary already counts failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaTally {
    pub flags: BTreeMap<String, usize>,
    pub totals: BTreeMap<String, f64>,
    pub distinct: BTreeMap<String, BTreeSet<String>>,
}

impl MetaReducer for MetaTally {
    fn observe(&mut self, meta: &Meta, _success: bool) {
        for (key, value) in meta.iter().filter(|(key, _)| *key != ERROR_KEY) {
            match value {
                MetaValue::Bool(true) => *self.flags.entry(key.to_string()).or_default() += 1,
                MetaValue::Bool(false) => {}
                MetaValue::Number(n) => *self.totals.entry(key.to_string()).or_default() += n,
                MetaValue::Text(text) => {
                    self.distinct
                        .entry(key.to_string())
                        .or_default()
                        .insert(text.clone());
                }
            }
        }
    }
}

impl MetaTally {
    /// Number of outcomes that carried `key: true`
    pub fn flag_count(&self, key: &str) -> usize {
        self.flags.get(key).copied().unwrap_or(0)
    }

    /// Sum of the numeric values recorded under `key`
    pub fn total(&self, key: &str) -> f64 {
        self.totals.get(key).copied().unwrap_or(0.0)
    }
}

/// Run-level statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary<R = MetaTally> {
    pub total: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub meta: R,
}

/// Final output of a run: successful payloads in input order plus the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReport<T, R = MetaTally> {
    pub payloads: Vec<T>,
    pub summary: Summary<R>,
}

impl<T, R: MetaReducer> AggregatedReport<T, R> {
    /// Pure fold over the ordered outcomes; failures contribute no payload
    pub fn from_outcomes(outcomes: Vec<Outcome<T>>) -> Self {
        let mut payloads = Vec::with_capacity(outcomes.len());
        let mut summary = Summary {
            total: outcomes.len(),
            success_count: 0,
            failure_count: 0,
            meta: R::default(),
        };

        for outcome in outcomes {
            let success = outcome.is_success();
            summary.meta.observe(outcome.meta(), success);

            match outcome {
                Outcome::Success { payload, .. } => {
                    summary.success_count += 1;
                    payloads.push(payload);
                }
                Outcome::Failure { .. } => summary.failure_count += 1,
            }
        }

        Self { payloads, summary }
    }
}

/// Aggregate with the default [`MetaTally`] reduction
pub fn aggregate<T>(outcomes: Vec<Outcome<T>>) -> AggregatedReport<T> {
    AggregatedReport::from_outcomes(outcomes)
}
