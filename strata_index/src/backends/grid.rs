// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid backend. A fixed world split into `cols × rows` bounded cells.

use core::fmt::Debug;
use core::ops::Range;

use strata_collections::Sequence;

use crate::backend::{DebugCanvas, SpatialIndex};
use crate::error::{IndexError, IndexResult};
use crate::types::Aabb;

/// Default number of boxes a single grid cell may hold.
pub const DEFAULT_CELL_CAPACITY: usize = 512;

/// Configuration for [`Grid`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// World extent covered by the cells.
    pub world: Aabb,
    /// Number of columns.
    pub cols: u32,
    /// Number of rows.
    pub rows: u32,
    /// Maximum boxes per cell.
    pub cell_capacity: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            world: Aabb::new(0.0, 0.0, 800.0, 600.0),
            cols: 16,
            rows: 12,
            cell_capacity: DEFAULT_CELL_CAPACITY,
        }
    }
}

/// Cell index range `[lo, hi)` covered by `min..max` along one axis.
///
/// `hi` is at least `lo + 1` so zero-sized boxes still land in a cell. Both
/// ends are clamped into the grid, which sends anything outside the world to
/// the border cells instead of losing it.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "Cell coordinates are clamped into 0..=count right after the float cast."
)]
pub(crate) fn span(min: f32, max: f32, origin: f32, size: f32, count: u32) -> Range<u32> {
    let count = i64::from(count);
    let lo = (((min - origin) / size).floor() as i64).clamp(0, count - 1);
    let hi = (((max - origin) / size).ceil() as i64).clamp(lo + 1, count);
    lo as u32..hi as u32
}

/// Uniform grid over a fixed world.
///
/// A box is appended to every cell its extent touches, so queries may return
/// the same box more than once. Cells have a fixed capacity; an insert that
/// would overflow any of its cells is rejected as a whole.
pub struct Grid {
    config: GridConfig,
    cell_w: f32,
    cell_h: f32,
    cells: Vec<Sequence<Aabb>>,
}

impl Grid {
    /// Create an empty grid.
    pub fn new(config: GridConfig) -> IndexResult<Self> {
        let invalid = |reason| IndexError::InvalidConfig {
            strategy: "grid",
            reason,
        };
        if config.cols == 0 || config.rows == 0 {
            return Err(invalid("cols and rows must be at least 1"));
        }
        if !config.world.has_area() {
            return Err(invalid("world must have a finite, positive size"));
        }
        if config.cell_capacity == 0 {
            return Err(invalid("cell_capacity must be at least 1"));
        }
        let count = config.cols as usize * config.rows as usize;
        let mut cells = Vec::with_capacity(count);
        cells.resize_with(count, Sequence::new);
        #[allow(
            clippy::cast_precision_loss,
            reason = "Cell counts are far below f32's exact integer range."
        )]
        let (cell_w, cell_h) = (
            config.world.w / config.cols as f32,
            config.world.h / config.rows as f32,
        );
        Ok(Self {
            config,
            cell_w,
            cell_h,
            cells,
        })
    }

    /// The configuration the grid was built with.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Width and height of one cell.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_w, self.cell_h)
    }

    /// Number of boxes stored in cell `(col, row)`, or `None` outside the grid.
    pub fn cell_len(&self, col: u32, row: u32) -> Option<usize> {
        (col < self.config.cols && row < self.config.rows)
            .then(|| self.cells[self.index(col, row)].len())
    }

    #[inline]
    fn index(&self, col: u32, row: u32) -> usize {
        row as usize * self.config.cols as usize + col as usize
    }

    fn cols_for(&self, a: &Aabb) -> Range<u32> {
        span(
            a.min_x(),
            a.max_x(),
            self.config.world.x,
            self.cell_w,
            self.config.cols,
        )
    }

    fn rows_for(&self, a: &Aabb) -> Range<u32> {
        span(
            a.min_y(),
            a.max_y(),
            self.config.world.y,
            self.cell_h,
            self.config.rows,
        )
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.is_empty()).count();
        let entries: usize = self.cells.iter().map(Sequence::len).sum();
        f.debug_struct("Grid")
            .field("world", &self.config.world)
            .field("cols", &self.config.cols)
            .field("rows", &self.config.rows)
            .field("cell_capacity", &self.config.cell_capacity)
            .field("occupied_cells", &occupied)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl SpatialIndex for Grid {
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()> {
        let cols = self.cols_for(&aabb);
        let rows = self.rows_for(&aabb);
        let capacity = self.config.cell_capacity;
        for row in rows.clone() {
            for col in cols.clone() {
                if self.cells[self.index(col, row)].len() >= capacity {
                    tracing::debug!(col, row, capacity, "grid cell full");
                    return Err(IndexError::CellFull { col, row, capacity });
                }
            }
        }
        for row in rows {
            for col in cols.clone() {
                let i = self.index(col, row);
                self.cells[i].push(aabb);
            }
        }
        Ok(())
    }

    fn query_into(&self, area: Aabb, out: &mut Sequence<Aabb>) {
        let cols = self.cols_for(&area);
        for row in self.rows_for(&area) {
            for col in cols.clone() {
                out.extend_from_slice(&self.cells[self.index(col, row)]);
            }
        }
    }

    fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    fn debug_draw(&self, canvas: &mut dyn DebugCanvas) {
        let world = self.config.world;
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                #[allow(
                    clippy::cast_precision_loss,
                    reason = "Cell coordinates are far below f32's exact integer range."
                )]
                let cell = Aabb::new(
                    world.x + col as f32 * self.cell_w,
                    world.y + row as f32 * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                );
                canvas.stroke_rect(cell.into());
            }
        }
    }
}
