// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for the four spatial strategies.
//!
//! - `naive`: one flat buffer; queries return everything.
//! - `grid`: uniform grid over a fixed world, bounded cells.
//! - `spatial_hash`: unbounded lattice hashed onto a fixed bucket table.
//! - `quadtree`: depth-limited region quadtree over a reusable node arena.
//!
//! Grid, spatial hash and quadtree store a box once per cell, bucket, or
//! quadrant it touches and never deduplicate, so query results are broad-phase
//! candidates. Each has a fixed per-container capacity and reports overflow as
//! an [`IndexError`](crate::IndexError) instead of dropping boxes.

pub mod grid;
pub mod naive;
pub mod quadtree;
pub mod spatial_hash;

pub use grid::{Grid, GridConfig};
pub use naive::{Naive, NaiveConfig};
pub use quadtree::{Quadtree, QuadtreeConfig};
pub use spatial_hash::{SpatialHash, SpatialHashConfig};
