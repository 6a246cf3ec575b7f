// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

/// Tolerance used by [`Aabb`] equality.
pub const EPSILON: f32 = 1e-4;

/// Axis-aligned box: top-left position and size, y pointing down.
///
/// Equality is approximate: two boxes compare equal when every component
/// differs by less than [`EPSILON`]. Overlap is strict, so boxes that only
/// share an edge do not overlap.
#[derive(Copy, Clone, Debug, Default)]
pub struct Aabb {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Aabb {
    /// Create a box from position and size.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from its min/max corners.
    pub fn from_min_max(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Left edge.
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub fn min_y(&self) -> f32 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge.
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    /// Strict AABB intersection. Touching edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.max_x() > other.x
            && self.x < other.max_x()
            && self.max_y() > other.y
            && self.y < other.max_y()
    }

    /// Component-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.w - other.w).abs() < EPSILON
            && (self.h - other.h).abs() < EPSILON
    }

    /// Whether all components are finite and the size is positive.
    pub fn has_area(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.w.is_finite()
            && self.h.is_finite()
            && self.w > 0.0
            && self.h > 0.0
    }

    /// Grow the box by `dx` on the left and right and `dy` on the top and bottom.
    pub fn inflate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x - dx, self.y - dy, self.w + 2.0 * dx, self.h + 2.0 * dy)
    }

    /// The four equal quadrants, in `[nw, ne, sw, se]` order.
    pub fn quadrants(&self) -> [Self; 4] {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        [
            Self::new(self.x, self.y, hw, hh),
            Self::new(self.x + hw, self.y, hw, hh),
            Self::new(self.x, self.y + hh, hw, hh),
            Self::new(self.x + hw, self.y + hh, hw, hh),
        ]
    }
}

impl PartialEq for Aabb {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl From<Aabb> for kurbo::Rect {
    fn from(a: Aabb) -> Self {
        Self::new(
            f64::from(a.min_x()),
            f64::from(a.min_y()),
            f64::from(a.max_x()),
            f64::from(a.max_y()),
        )
    }
}
