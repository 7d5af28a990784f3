//! Result aggregator for ordering parallel solver results
//!
//! Results arrive in completion order. The aggregator holds them back until
//! every result that sorts before them by (year, day, part) has been emitted.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not emitted yet
    expected: BTreeSet<ResultKey>,
    /// Received results waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let (Some(next_expected), Some(next_pending)) =
            (self.expected.first(), self.pending.first_key_value())
        {
            if next_pending.0 != next_expected {
                break;
            }
            self.expected.pop_first();
            if let Some((_, result)) = self.pending.pop_first() {
                ready.push(result);
            }
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let pending = std::mem::take(&mut self.pending);
        for key in pending.keys() {
            self.expected.remove(key);
        }
        pending.into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }

    /// Keys that never arrived
    pub fn missing(&self) -> impl Iterator<Item = &ResultKey> {
        self.expected.iter()
    }
}
