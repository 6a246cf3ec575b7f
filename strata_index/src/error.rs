// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the spatial indexes.

use thiserror::Error;

/// Why an index could not be built or could not take a box.
///
/// The capacity variants mean the workload is denser than the configured
/// granularity. Nothing is dropped silently: the caller decides whether to
/// abort, log, or rebuild with coarser cells or a deeper tree.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// A grid cell already holds its maximum number of boxes.
    #[error("grid cell ({col}, {row}) is full at {capacity} boxes; use smaller cells or raise the cell capacity")]
    CellFull {
        /// Column of the full cell.
        col: u32,
        /// Row of the full cell.
        row: u32,
        /// Per-cell limit.
        capacity: usize,
    },

    /// A spatial hash bucket already holds its maximum number of boxes.
    #[error("spatial hash bucket {bucket} is full at {capacity} boxes; add buckets or raise the bucket capacity")]
    BucketFull {
        /// Index of the full bucket.
        bucket: usize,
        /// Per-bucket limit.
        capacity: usize,
    },

    /// A quadtree node at the depth limit already holds its maximum number of boxes.
    #[error("quadtree node at depth {depth} is full at {capacity} boxes; raise max_depth or the node capacity")]
    NodeFull {
        /// Depth of the full node (root is 0).
        depth: u32,
        /// Per-node limit.
        capacity: usize,
    },

    /// The configuration cannot describe a working index.
    #[error("invalid {strategy} configuration: {reason}")]
    InvalidConfig {
        /// Strategy being configured.
        strategy: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Result alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;
