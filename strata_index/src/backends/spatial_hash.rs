// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial hash backend. An unbounded lattice of cells folded onto a fixed bucket table.

use core::fmt::Debug;
use core::ops::Range;

use smallvec::SmallVec;
use strata_collections::Sequence;

use crate::backend::{DebugCanvas, SpatialIndex};
use crate::error::{IndexError, IndexResult};
use crate::types::Aabb;

/// Default number of boxes a single bucket may hold.
pub const DEFAULT_BUCKET_CAPACITY: usize = 128;

/// Configuration for [`SpatialHash`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialHashConfig {
    /// Cell width.
    pub cell_w: f32,
    /// Cell height.
    pub cell_h: f32,
    /// Number of buckets in the table.
    pub bucket_count: usize,
    /// Maximum boxes per bucket.
    pub bucket_capacity: usize,
    /// Region whose cell lattice [`debug_draw`](SpatialIndex::debug_draw) strokes.
    pub view: Aabb,
}

impl Default for SpatialHashConfig {
    fn default() -> Self {
        Self {
            cell_w: 50.0,
            cell_h: 50.0,
            bucket_count: 1024,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            view: Aabb::new(0.0, 0.0, 800.0, 600.0),
        }
    }
}

/// Mix integer cell coordinates into a 64-bit hash.
///
/// Packs `x` into the high half and `y` into the low half of a word, then
/// runs the `splitmix64` finalizer over it.
pub fn hash_cell(x: i32, y: i32) -> u64 {
    let mut h = (u64::from(x.cast_unsigned()) << 32) | u64::from(y.cast_unsigned());
    h = (h ^ (h >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    h = (h ^ (h >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    h ^ (h >> 31)
}

/// Cell coordinates `[lo, hi)` covered by `min..max` along one axis, at least one cell wide.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell coordinates are clamped into i32 range right after the float cast."
)]
fn cell_span(min: f32, max: f32, size: f32) -> Range<i32> {
    let lo = ((min / size).floor() as i64).clamp(i64::from(i32::MIN), i64::from(i32::MAX) - 1);
    let hi = ((max / size).ceil() as i64).clamp(lo + 1, i64::from(i32::MAX));
    lo as i32..hi as i32
}

/// Grid of fixed-size cells with no world bounds.
///
/// Cell coordinates are hashed into `bucket_count` buckets, so distant cells
/// can share a bucket and queries may return boxes from unrelated cells. A box
/// is appended once per cell it touches, which means duplicates in results,
/// and twice into one bucket if two of its cells collide there.
pub struct SpatialHash {
    config: SpatialHashConfig,
    buckets: Vec<Sequence<Aabb>>,
}

impl SpatialHash {
    /// Create an empty spatial hash.
    pub fn new(config: SpatialHashConfig) -> IndexResult<Self> {
        let invalid = |reason| IndexError::InvalidConfig {
            strategy: "spatial_hash",
            reason,
        };
        let sizes_ok = config.cell_w.is_finite()
            && config.cell_h.is_finite()
            && config.cell_w > 0.0
            && config.cell_h > 0.0;
        if !sizes_ok {
            return Err(invalid("cell size must be finite and positive"));
        }
        if config.bucket_count == 0 {
            return Err(invalid("bucket_count must be at least 1"));
        }
        if config.bucket_capacity == 0 {
            return Err(invalid("bucket_capacity must be at least 1"));
        }
        let mut buckets = Vec::with_capacity(config.bucket_count);
        buckets.resize_with(config.bucket_count, Sequence::new);
        Ok(Self { config, buckets })
    }

    /// The configuration the table was built with.
    pub fn config(&self) -> &SpatialHashConfig {
        &self.config
    }

    /// Bucket that cell `(x, y)` maps to.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The remainder is below bucket_count, which is a usize."
    )]
    pub fn bucket_of(&self, x: i32, y: i32) -> usize {
        (hash_cell(x, y) % self.buckets.len() as u64) as usize
    }

    /// Number of boxes in `bucket`, or `None` past the table.
    pub fn bucket_len(&self, bucket: usize) -> Option<usize> {
        self.buckets.get(bucket).map(Sequence::len)
    }

    fn cells_for(&self, a: &Aabb) -> (Range<i32>, Range<i32>) {
        (
            cell_span(a.min_x(), a.max_x(), self.config.cell_w),
            cell_span(a.min_y(), a.max_y(), self.config.cell_h),
        )
    }
}

impl Debug for SpatialHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|b| !b.is_empty()).count();
        let entries: usize = self.buckets.iter().map(Sequence::len).sum();
        f.debug_struct("SpatialHash")
            .field("cell_w", &self.config.cell_w)
            .field("cell_h", &self.config.cell_h)
            .field("bucket_count", &self.buckets.len())
            .field("bucket_capacity", &self.config.bucket_capacity)
            .field("occupied_buckets", &occupied)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl SpatialIndex for SpatialHash {
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()> {
        let (xs, ys) = self.cells_for(&aabb);
        let mut targets: SmallVec<[usize; 16]> = SmallVec::new();
        for y in ys {
            for x in xs.clone() {
                targets.push(self.bucket_of(x, y));
            }
        }
        targets.sort_unstable();
        let capacity = self.config.bucket_capacity;
        for run in targets.chunk_by(|a, b| a == b) {
            let bucket = run[0];
            if self.buckets[bucket].len() + run.len() > capacity {
                tracing::debug!(bucket, capacity, "spatial hash bucket full");
                return Err(IndexError::BucketFull { bucket, capacity });
            }
        }
        for bucket in targets {
            self.buckets[bucket].push(aabb);
        }
        Ok(())
    }

    fn query_into(&self, area: Aabb, out: &mut Sequence<Aabb>) {
        let (xs, ys) = self.cells_for(&area);
        for y in ys {
            for x in xs.clone() {
                out.extend_from_slice(&self.buckets[self.bucket_of(x, y)]);
            }
        }
    }

    fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    fn debug_draw(&self, canvas: &mut dyn DebugCanvas) {
        let (xs, ys) = self.cells_for(&self.config.view);
        let (w, h) = (self.config.cell_w, self.config.cell_h);
        for y in ys {
            for x in xs.clone() {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Drawn lattice coordinates stay small."
                )]
                let cell = Aabb::new(x as f32 * w, y as f32 * h, w, h);
                canvas.stroke_rect(cell.into());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_spreads_neighbours() {
        assert_eq!(hash_cell(3, -7), hash_cell(3, -7));
        assert_ne!(hash_cell(0, 1), hash_cell(1, 0));
        assert_ne!(hash_cell(0, 0), hash_cell(0, 1));
        // The finalizer maps zero to zero.
        assert_eq!(hash_cell(0, 0), 0);
    }

    #[test]
    fn cell_span_handles_negative_space() {
        assert_eq!(cell_span(-60.0, -40.0, 50.0), -2..0);
        assert_eq!(cell_span(0.0, 50.0, 50.0), 0..1);
        assert_eq!(cell_span(25.0, 25.0, 50.0), 0..1);
    }

    #[test]
    fn finds_boxes_far_from_origin() {
        let mut s = SpatialHash::new(SpatialHashConfig::default()).unwrap();
        let far = Aabb::new(-12_000.0, 48_000.0, 10.0, 10.0);
        let near = Aabb::new(10.0, 10.0, 10.0, 10.0);
        s.insert(far).unwrap();
        s.insert(near).unwrap();
        let hits = s.query(far.inflate(1.0, 1.0));
        assert!(hits.iter().any(|b| *b == far), "far box must be found");
        let hits = s.query(near);
        assert!(hits.iter().any(|b| *b == near), "near box must be found");
    }

    #[test]
    fn straddling_box_lands_in_every_cell_bucket() {
        let mut s = SpatialHash::new(SpatialHashConfig::default()).unwrap();
        let a = Aabb::new(40.0, 40.0, 20.0, 20.0);
        s.insert(a).unwrap();
        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            let hit = s.query(Aabb::new(x as f32 * 50.0 + 1.0, y as f32 * 50.0 + 1.0, 1.0, 1.0));
            assert!(hit.contains(&a), "cell ({x}, {y}) must see the box");
        }
    }

    #[test]
    fn collisions_count_against_one_bucket() {
        // A single bucket: every cell collides.
        let mut s = SpatialHash::new(SpatialHashConfig {
            bucket_count: 1,
            bucket_capacity: 3,
            ..SpatialHashConfig::default()
        })
        .unwrap();
        s.insert(Aabb::new(10.0, 10.0, 1.0, 1.0)).unwrap();
        // Two cells, same bucket: needs two slots.
        s.insert(Aabb::new(45.0, 10.0, 10.0, 1.0)).unwrap();
        assert_eq!(s.bucket_len(0), Some(3));
        let err = s.insert(Aabb::new(200.0, 200.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(
            err,
            IndexError::BucketFull {
                bucket: 0,
                capacity: 3
            }
        );
        assert_eq!(s.bucket_len(0), Some(3));
    }

    #[test]
    fn failed_insert_leaves_table_untouched() {
        let mut s = SpatialHash::new(SpatialHashConfig {
            bucket_count: 1,
            bucket_capacity: 2,
            ..SpatialHashConfig::default()
        })
        .unwrap();
        s.insert(Aabb::new(10.0, 10.0, 1.0, 1.0)).unwrap();
        assert!(s.insert(Aabb::new(45.0, 10.0, 10.0, 1.0)).is_err());
        assert_eq!(s.bucket_len(0), Some(1));
    }

    #[test]
    fn clear_and_draw() {
        let mut s = SpatialHash::new(SpatialHashConfig {
            view: Aabb::new(0.0, 0.0, 100.0, 50.0),
            ..SpatialHashConfig::default()
        })
        .unwrap();
        s.insert(Aabb::new(10.0, 10.0, 1.0, 1.0)).unwrap();
        s.clear();
        assert!(s.query(Aabb::new(0.0, 0.0, 100.0, 100.0)).is_empty());
        let mut canvas: Vec<kurbo::Rect> = Vec::new();
        s.debug_draw(&mut canvas);
        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas[1], kurbo::Rect::new(50.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn rejects_zero_buckets() {
        let cfg = SpatialHashConfig {
            bucket_count: 0,
            ..SpatialHashConfig::default()
        };
        assert!(SpatialHash::new(cfg).is_err());
    }
}
