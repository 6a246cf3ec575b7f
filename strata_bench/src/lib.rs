// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Bench: drives the Strata spatial strategies through identical workloads.
//!
//! - [`Workload`]: seeded uniform or clustered box populations.
//! - [`run_cycle`] / [`run_benchmark`]: the insert → query → clear loop and its timing.
//! - [`Recorder`]: per-count samples summarized into [`BenchmarkRecord`]s.
//!
//! ```rust
//! use strata_bench::{Workload, run_benchmark};
//! use strata_index::{QuadtreeConfig, Strategy};
//!
//! let mut index = Strategy::new(QuadtreeConfig::default())?;
//! let report = run_benchmark(&mut index, &Workload::default(), &[100, 200], 2)?;
//! assert_eq!(report.strategy, "quadtree");
//! assert_eq!(report.records.len(), 2);
//! # Ok::<(), strata_bench::BenchError>(())
//! ```

pub mod error;
pub mod harness;
pub mod recorder;
pub mod workload;

pub use error::{BenchError, BenchResult};
pub use harness::{CycleOutcome, QUERY_MARGIN, draw_populated, run_benchmark, run_cycle};
pub use recorder::{BenchmarkRecord, Recorder, Report};
pub use workload::{Distribution, Workload};
