// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Naive backend: one flat buffer, no acceleration. Baseline for correctness and timing.

use core::fmt::Debug;

use strata_collections::Sequence;

use crate::backend::{DebugCanvas, SpatialIndex};
use crate::error::IndexResult;
use crate::types::Aabb;

/// Configuration for [`Naive`]. There is nothing to tune.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NaiveConfig;

/// Flat buffer of every inserted box.
///
/// Queries ignore the area and return every stored box, so the result is a
/// superset of any real query.
#[derive(Clone, Default)]
pub struct Naive {
    boxes: Sequence<Aabb>,
}

impl Naive {
    /// Create an empty index.
    pub fn new(_config: NaiveConfig) -> Self {
        Self::default()
    }

    /// Number of stored boxes.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether no boxes are stored.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

impl Debug for Naive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Naive")
            .field("boxes", &self.boxes.len())
            .field("capacity", &self.boxes.capacity())
            .finish_non_exhaustive()
    }
}

impl SpatialIndex for Naive {
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()> {
        self.boxes.push(aabb);
        Ok(())
    }

    fn query_into(&self, _area: Aabb, out: &mut Sequence<Aabb>) {
        out.extend_from_slice(&self.boxes);
    }

    fn clear(&mut self) {
        self.boxes.clear();
    }

    fn debug_draw(&self, _canvas: &mut dyn DebugCanvas) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_returns_everything_regardless_of_area() {
        let mut n = Naive::new(NaiveConfig);
        n.insert(Aabb::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        n.insert(Aabb::new(50.0, 50.0, 1.0, 1.0)).unwrap();
        n.insert(Aabb::new(-20.0, 900.0, 3.0, 3.0)).unwrap();
        assert_eq!(n.query(Aabb::new(0.0, 0.0, 1.0, 1.0)).len(), 3);
        assert_eq!(n.query(Aabb::new(1e6, 1e6, 0.0, 0.0)).len(), 3);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut n = Naive::default();
        for i in 0..100_u8 {
            n.insert(Aabb::new(f32::from(i), 0.0, 1.0, 1.0)).unwrap();
        }
        let cap = n.boxes.capacity();
        n.clear();
        assert!(n.is_empty());
        assert_eq!(n.boxes.capacity(), cap);
        assert!(n.query(Aabb::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }

    #[test]
    fn draws_nothing() {
        let mut n = Naive::default();
        n.insert(Aabb::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        let mut canvas: Vec<kurbo::Rect> = Vec::new();
        n.debug_draw(&mut canvas);
        assert!(canvas.is_empty());
    }
}
