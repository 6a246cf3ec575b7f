// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timing samples per configuration, and their JSON summary.

use serde::{Deserialize, Serialize};
use strata_collections::{OpenMap, Sequence};

/// Aggregate timings for one box count, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    /// Boxes inserted per cycle.
    pub box_count: u32,
    /// Sum of all cycle times.
    pub total: f64,
    /// Mean cycle time.
    pub average: f64,
    /// Fastest cycle.
    pub min: f64,
    /// Slowest cycle.
    pub max: f64,
}

impl BenchmarkRecord {
    /// Summarize `samples`. No samples yields all zeros.
    pub fn from_samples(box_count: u32, samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self {
                box_count,
                total: 0.0,
                average: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let total: f64 = samples.iter().sum();
        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        #[allow(
            clippy::cast_precision_loss,
            reason = "Sample counts are far below 2^52."
        )]
        let average = total / samples.len() as f64;
        Self {
            box_count,
            total,
            average,
            min,
            max,
        }
    }
}

/// Everything one strategy produced in a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Strategy name, as in [`Strategy::name`](strata_index::Strategy::name).
    pub strategy: String,
    /// One record per box count, ascending.
    pub records: Vec<BenchmarkRecord>,
}

/// Collects per-cycle timings keyed by box count.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    samples: OpenMap<u32, Sequence<f64>>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one cycle time for `box_count`.
    pub fn record(&mut self, box_count: u32, elapsed_ms: f64) {
        self.samples
            .get_or_insert_with(box_count, Sequence::new)
            .push(elapsed_ms);
    }

    /// Raw samples for `box_count`, in recording order.
    pub fn samples(&self, box_count: u32) -> Option<&[f64]> {
        self.samples.get_ref(&box_count).map(Sequence::as_slice)
    }

    /// Number of box counts with samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One summary per box count, ordered by ascending box count.
    pub fn records(&self) -> Vec<BenchmarkRecord> {
        let mut out: Vec<_> = self
            .samples
            .iter()
            .map(|(&count, samples)| BenchmarkRecord::from_samples(count, samples))
            .collect();
        out.sort_unstable_by_key(|r| r.box_count);
        out
    }

    /// Package the summaries under `strategy`.
    pub fn report(&self, strategy: &str) -> Report {
        Report {
            strategy: strategy.to_owned(),
            records: self.records(),
        }
    }
}
