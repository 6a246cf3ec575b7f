// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strata Index: four interchangeable 2D AABB indexes behind one contract.
//!
//! - [`Naive`]: a flat buffer; every query returns every box.
//! - [`Grid`]: a fixed world cut into `cols × rows` bounded cells.
//! - [`SpatialHash`]: an unbounded lattice of cells hashed onto a fixed bucket table.
//! - [`Quadtree`]: a depth-limited region quadtree over a reusable node arena.
//!
//! All four implement [`SpatialIndex`]: `insert`, `query`, `clear`, plus a
//! [`debug_draw`](SpatialIndex::debug_draw) hook that strokes the index's
//! structure onto any [`DebugCanvas`]. [`Strategy`] wraps the four in one enum so
//! a benchmark or game loop can swap them from configuration alone.
//!
//! Indexes are built for repeated insert → query → clear cycles. `clear` keeps
//! every allocation, so steady-state cycles do not allocate inside the index.
//!
//! # Example
//!
//! ```rust
//! use strata_index::{Aabb, GridConfig, SpatialIndex, Strategy};
//!
//! let mut index = Strategy::new(GridConfig {
//!     world: Aabb::new(0.0, 0.0, 100.0, 100.0),
//!     cols: 2,
//!     rows: 2,
//!     ..GridConfig::default()
//! })?;
//!
//! index.insert(Aabb::new(10.0, 10.0, 5.0, 5.0))?;
//! index.insert(Aabb::new(60.0, 60.0, 5.0, 5.0))?;
//!
//! let hits = index.query(Aabb::new(0.0, 0.0, 50.0, 50.0));
//! assert_eq!(hits.as_slice(), &[Aabb::new(10.0, 10.0, 5.0, 5.0)]);
//!
//! index.clear();
//! assert!(index.query(Aabb::new(0.0, 0.0, 100.0, 100.0)).is_empty());
//! # Ok::<(), strata_index::IndexError>(())
//! ```
//!
//! ## Query results
//!
//! Results are broad-phase candidates. Grid, spatial hash and quadtree store a
//! box once per cell, bucket or quadrant it touches, and return whole cells,
//! so a result can hold duplicates and boxes near (but not overlapping) the
//! area. Every stored box that overlaps the area is returned at least once.
//! Filter with [`Aabb::overlaps`] when exact hits matter.
//!
//! ## Capacity
//!
//! Grid cells, hash buckets and last-level quadtree nodes have fixed
//! capacities. An insert that would exceed one returns an [`IndexError`]
//! naming the structure and the limit, so callers can pick coarser cells or a
//! deeper tree instead of losing boxes.

pub mod backend;
pub mod backends;
pub mod error;
pub mod strategy;
pub mod types;

pub use backend::{DebugCanvas, SpatialIndex};
pub use backends::{
    Grid, GridConfig, Naive, NaiveConfig, Quadtree, QuadtreeConfig, SpatialHash,
    SpatialHashConfig,
};
pub use error::{IndexError, IndexResult};
pub use strategy::{Strategy, StrategyConfig};
pub use types::Aabb;

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> [StrategyConfig; 4] {
        let world = Aabb::new(0.0, 0.0, 400.0, 400.0);
        [
            NaiveConfig.into(),
            GridConfig {
                world,
                cols: 8,
                rows: 8,
                ..GridConfig::default()
            }
            .into(),
            SpatialHashConfig {
                cell_w: 40.0,
                cell_h: 40.0,
                bucket_count: 64,
                ..SpatialHashConfig::default()
            }
            .into(),
            QuadtreeConfig {
                area: world,
                max_depth: 5,
                max_box_count: 4,
                ..QuadtreeConfig::default()
            }
            .into(),
        ]
    }

    /// Deterministic scatter of boxes with mixed sizes, some straddling cell lines.
    fn scatter() -> Vec<Aabb> {
        let mut state = 0x2545_f491_u32;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            f32::from(u16::try_from(state % 1000).unwrap_or(0)) / 1000.0
        };
        (0..200)
            .map(|_| {
                let w = 2.0 + next() * 30.0;
                let h = 2.0 + next() * 30.0;
                Aabb::new(next() * (400.0 - w), next() * (400.0 - h), w, h)
            })
            .collect()
    }

    #[test]
    fn no_false_negatives_across_strategies() {
        let boxes = scatter();
        let probes = [
            Aabb::new(0.0, 0.0, 400.0, 400.0),
            Aabb::new(100.0, 100.0, 50.0, 50.0),
            Aabb::new(39.0, 0.0, 2.0, 400.0),
            Aabb::new(250.0, 310.0, 5.0, 5.0),
        ];
        for config in configs() {
            let mut index = Strategy::new(config).unwrap();
            for b in &boxes {
                index.insert(*b).unwrap();
            }
            for area in probes.iter().copied().chain(boxes.iter().copied()) {
                let hits = index.query(area);
                for b in boxes.iter().filter(|b| b.overlaps(&area)) {
                    assert!(
                        hits.contains(b),
                        "{} missed {b:?} for {area:?}",
                        index.name()
                    );
                }
            }
        }
    }

    #[test]
    fn isolated_probe_returns_no_ghost_of_itself() {
        let ghost = Aabb::new(300.0, 300.0, 10.0, 10.0);
        for config in configs() {
            let mut index = Strategy::new(config).unwrap();
            index.insert(Aabb::new(10.0, 10.0, 5.0, 5.0)).unwrap();
            index.insert(Aabb::new(150.0, 40.0, 5.0, 5.0)).unwrap();
            assert!(
                !index.query(ghost).contains(&ghost),
                "{} invented a box",
                index.name()
            );
        }
    }

    #[test]
    fn grid_two_by_two_scenario() {
        let mut index = Strategy::new(GridConfig {
            world: Aabb::new(0.0, 0.0, 100.0, 100.0),
            cols: 2,
            rows: 2,
            ..GridConfig::default()
        })
        .unwrap();
        let first = Aabb::new(10.0, 10.0, 5.0, 5.0);
        let second = Aabb::new(60.0, 60.0, 5.0, 5.0);
        index.insert(first).unwrap();
        index.insert(second).unwrap();
        assert_eq!(
            index.query(Aabb::new(0.0, 0.0, 50.0, 50.0)).as_slice(),
            &[first]
        );
        assert_eq!(
            index.query(Aabb::new(50.0, 50.0, 50.0, 50.0)).as_slice(),
            &[second]
        );
    }

    #[test]
    fn quadtree_single_box_threshold_scenario() {
        let mut index = Strategy::new(QuadtreeConfig {
            area: Aabb::new(0.0, 0.0, 8.0, 8.0),
            max_depth: 4,
            max_box_count: 1,
            ..QuadtreeConfig::default()
        })
        .unwrap();
        let a = Aabb::new(1.0, 1.0, 1.0, 1.0);
        let b = Aabb::new(5.0, 5.0, 1.0, 1.0);
        index.insert(a).unwrap();
        if let Strategy::Quadtree(tree) = &index {
            assert!(!tree.is_subdivided());
        }
        index.insert(b).unwrap();
        if let Strategy::Quadtree(tree) = &index {
            assert!(tree.is_subdivided());
        }
        let hits = index.query(Aabb::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&a) && hits.contains(&b));
        index.clear();
        assert!(index.query(Aabb::new(0.0, 0.0, 8.0, 8.0)).is_empty());
    }

    #[test]
    fn naive_returns_all_three() {
        let mut index = Strategy::new(NaiveConfig).unwrap();
        for i in 0..3_u8 {
            let v = f32::from(i) * 100.0;
            index.insert(Aabb::new(v, v, 1.0, 1.0)).unwrap();
        }
        for area in [
            Aabb::new(0.0, 0.0, 1.0, 1.0),
            Aabb::new(-500.0, -500.0, 1.0, 1.0),
            Aabb::default(),
        ] {
            assert_eq!(index.query(area).len(), 3);
        }
    }

    #[test]
    fn debug_draw_never_changes_results() {
        let boxes = scatter();
        for config in configs() {
            let mut index = Strategy::new(config).unwrap();
            for b in &boxes {
                index.insert(*b).unwrap();
            }
            let area = Aabb::new(50.0, 50.0, 120.0, 80.0);
            let before = index.query(area);
            let mut canvas: Vec<kurbo::Rect> = Vec::new();
            index.debug_draw(&mut canvas);
            assert_eq!(index.query(area), before, "{}", index.name());
        }
    }

    #[test]
    fn query_into_appends() {
        let mut index = Strategy::new(NaiveConfig).unwrap();
        index.insert(Aabb::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        let mut out = strata_collections::Sequence::new();
        out.push(Aabb::new(9.0, 9.0, 9.0, 9.0));
        index.query_into(Aabb::default(), &mut out);
        assert_eq!(out.len(), 2);
    }
}
