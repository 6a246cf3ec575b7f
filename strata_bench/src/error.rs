// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by the benchmark driver.

use strata_index::IndexError;
use thiserror::Error;

/// Anything that stops a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// An index rejected its configuration or a box.
    #[error("index error: {0}")]
    Index(#[from] IndexError),
    /// The report could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The report could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Command-line values that cannot describe a run.
    #[error("invalid arguments: {0}")]
    Args(String),
}

/// Result alias for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;
