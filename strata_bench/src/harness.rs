// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The insert → query → clear driver.

use std::time::Instant;

use strata_collections::Sequence;
use strata_index::{Aabb, DebugCanvas, IndexResult, SpatialIndex, Strategy};

use crate::error::BenchResult;
use crate::recorder::{Recorder, Report};
use crate::workload::Workload;

/// How far each per-box query reaches past the box on every side.
pub const QUERY_MARGIN: f32 = 1.0;

/// What one insert → query → clear cycle did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CycleOutcome {
    /// Wall-clock time for the whole cycle.
    pub elapsed_ms: f64,
    /// Candidates that truly overlap their query area, summed over all queries.
    /// Each box counts itself, and a box returned twice counts twice.
    pub hits: usize,
}

/// Insert `boxes`, query around each one, then clear.
///
/// `scratch` is reused for query results so steady-state cycles allocate
/// nothing. On a capacity error the index is cleared before returning.
pub fn run_cycle<I: SpatialIndex + ?Sized>(
    index: &mut I,
    boxes: &[Aabb],
    scratch: &mut Sequence<Aabb>,
) -> IndexResult<CycleOutcome> {
    let start = Instant::now();
    for b in boxes {
        if let Err(err) = index.insert(*b) {
            index.clear();
            return Err(err);
        }
    }
    let mut hits = 0;
    for b in boxes {
        let area = b.inflate(QUERY_MARGIN, QUERY_MARGIN);
        scratch.clear();
        index.query_into(area, scratch);
        hits += scratch.iter().filter(|c| c.overlaps(&area)).count();
    }
    index.clear();
    Ok(CycleOutcome {
        elapsed_ms: start.elapsed().as_secs_f64() * 1e3,
        hits,
    })
}

/// Run `iterations` cycles for each count in `counts` and summarize them.
///
/// Populations come from `workload`, one per count, reused across that
/// count's iterations. The first capacity error aborts the run.
pub fn run_benchmark(
    strategy: &mut Strategy,
    workload: &Workload,
    counts: &[u32],
    iterations: u32,
) -> BenchResult<Report> {
    let name = strategy.name();
    let mut recorder = Recorder::new();
    let mut scratch = Sequence::new();
    for &count in counts {
        let boxes = workload.boxes(count as usize);
        tracing::info!(strategy = name, count, iterations, "running configuration");
        for iteration in 0..iterations {
            match run_cycle(strategy, &boxes, &mut scratch) {
                Ok(outcome) => {
                    tracing::trace!(
                        strategy = name,
                        count,
                        iteration,
                        elapsed_ms = outcome.elapsed_ms,
                        hits = outcome.hits,
                        "cycle done"
                    );
                    recorder.record(count, outcome.elapsed_ms);
                }
                Err(err) => {
                    tracing::warn!(strategy = name, count, iteration, %err, "cycle failed");
                    return Err(err.into());
                }
            }
        }
    }
    Ok(recorder.report(name))
}

/// Populate `index` with `boxes`, stroke its structure onto `canvas`, then clear it.
pub fn draw_populated<I: SpatialIndex + ?Sized>(
    index: &mut I,
    boxes: &[Aabb],
    canvas: &mut dyn DebugCanvas,
) -> IndexResult<()> {
    for b in boxes {
        if let Err(err) = index.insert(*b) {
            index.clear();
            return Err(err);
        }
    }
    index.debug_draw(canvas);
    index.clear();
    Ok(())
}
