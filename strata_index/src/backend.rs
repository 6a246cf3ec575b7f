// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract every spatial strategy implements, and the debug-draw hook.

use strata_collections::Sequence;

use crate::error::IndexResult;
use crate::types::Aabb;

/// Spatial index over boxes.
///
/// Indexes are built once, then cycled through `insert`, `query`, and `clear`
/// as often as needed. `clear` keeps every allocation; dropping the index
/// releases them.
pub trait SpatialIndex {
    /// Add a box.
    ///
    /// Fails when the box would push a fixed-capacity cell, bucket, or node
    /// past its limit.
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()>;

    /// Append candidate boxes for `area` to `out`.
    ///
    /// Every stored box that overlaps `area` is appended at least once.
    /// Boxes stored in several cells can appear several times, and boxes that
    /// merely share a cell with `area` may appear too; filter with
    /// [`Aabb::overlaps`] for exact hits.
    fn query_into(&self, area: Aabb, out: &mut Sequence<Aabb>);

    /// Candidate boxes for `area` in a freshly allocated sequence.
    fn query(&self, area: Aabb) -> Sequence<Aabb> {
        let mut out = Sequence::new();
        self.query_into(area, &mut out);
        out
    }

    /// Remove every box, keeping allocations for the next cycle.
    fn clear(&mut self);

    /// Stroke the index's internal structure onto `canvas`. Never changes the index.
    fn debug_draw(&self, canvas: &mut dyn DebugCanvas);
}

/// Drawing surface for [`SpatialIndex::debug_draw`].
pub trait DebugCanvas {
    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: kurbo::Rect);
}

/// Records every stroked rectangle.
impl DebugCanvas for Vec<kurbo::Rect> {
    fn stroke_rect(&mut self, rect: kurbo::Rect) {
        self.push(rect);
    }
}
