// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded quadtree backend over a reusable node arena.

use core::fmt::Debug;

use strata_collections::Sequence;

use crate::backend::{DebugCanvas, SpatialIndex};
use crate::error::{IndexError, IndexResult};
use crate::types::Aabb;

/// Default number of boxes a node at the depth limit may hold.
pub const DEFAULT_NODE_CAPACITY: usize = 128;

/// Deepest tree [`Quadtree::new`] accepts.
pub const MAX_SUPPORTED_DEPTH: u32 = 10;

/// Configuration for [`Quadtree`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadtreeConfig {
    /// Area covered by the root. Boxes outside it are not stored.
    pub area: Aabb,
    /// Number of levels, root included. Nodes on the last level never subdivide.
    pub max_depth: u32,
    /// Boxes a leaf holds before the next insert subdivides it.
    pub max_box_count: usize,
    /// Maximum boxes in a node on the last level.
    pub node_capacity: usize,
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self {
            area: Aabb::new(0.0, 0.0, 800.0, 600.0),
            max_depth: 6,
            max_box_count: 8,
            node_capacity: DEFAULT_NODE_CAPACITY,
        }
    }
}

#[derive(Clone)]
struct Node {
    area: Aabb,
    boxes: Sequence<Aabb>,
    /// `[nw, ne, sw, se]` arena indices once subdivided.
    children: Option<[usize; 4]>,
}

impl Node {
    fn new(area: Aabb) -> Self {
        Self {
            area,
            boxes: Sequence::new(),
            children: None,
        }
    }

    fn reset(&mut self, area: Aabb) {
        self.area = area;
        self.boxes.clear();
        self.children = None;
    }
}

/// Region quadtree with a depth limit.
///
/// Nodes live in an arena addressed by index. The arena is reserved for the
/// deepest possible tree up front; [`clear`](SpatialIndex::clear) rewinds it
/// to a single root leaf in O(1) and later subdivisions reuse the old nodes
/// and their buffers.
///
/// A leaf holding `max_box_count` boxes subdivides on the next insert and
/// hands its boxes to the overlapping quadrants. Subdivision is permanent
/// until `clear`. Straddling boxes are stored in every quadrant they touch.
///
/// An insert that overflows a last-level node returns
/// [`IndexError::NodeFull`]; copies already placed in sibling quadrants stay.
pub struct Quadtree {
    config: QuadtreeConfig,
    nodes: Vec<Node>,
    in_use: usize,
}

impl Quadtree {
    /// Create a tree holding only an empty root.
    pub fn new(config: QuadtreeConfig) -> IndexResult<Self> {
        let invalid = |reason| IndexError::InvalidConfig {
            strategy: "quadtree",
            reason,
        };
        if !config.area.has_area() {
            return Err(invalid("area must have a finite, positive size"));
        }
        if !(1..=MAX_SUPPORTED_DEPTH).contains(&config.max_depth) {
            return Err(invalid("max_depth must be between 1 and 10"));
        }
        if config.node_capacity == 0 {
            return Err(invalid("node_capacity must be at least 1"));
        }
        if config.max_box_count == 0 || config.max_box_count > config.node_capacity {
            return Err(invalid("max_box_count must be in 1..=node_capacity"));
        }
        // Nodes in a full tree: 1 + 4 + ... + 4^(max_depth - 1).
        let pool = (4_usize.pow(config.max_depth) - 1) / 3;
        let mut nodes = Vec::with_capacity(pool);
        nodes.push(Node::new(config.area));
        Ok(Self {
            config,
            nodes,
            in_use: 1,
        })
    }

    /// The configuration the tree was built with.
    pub fn config(&self) -> &QuadtreeConfig {
        &self.config
    }

    /// Nodes currently part of the tree, root included.
    pub fn node_count(&self) -> usize {
        self.in_use
    }

    /// Whether the root has subdivided.
    pub fn is_subdivided(&self) -> bool {
        self.nodes[0].children.is_some()
    }

    fn alloc(&mut self, area: Aabb) -> usize {
        let index = self.in_use;
        if let Some(node) = self.nodes.get_mut(index) {
            node.reset(area);
        } else {
            self.nodes.push(Node::new(area));
        }
        self.in_use += 1;
        index
    }

    fn subdivide(&mut self, node: usize, depth: u32) -> IndexResult<()> {
        tracing::trace!(node, depth, "quadtree node subdividing");
        let quadrants = self.nodes[node].area.quadrants();
        let mut children = [0; 4];
        for (slot, area) in children.iter_mut().zip(quadrants) {
            *slot = self.alloc(area);
        }
        self.nodes[node].children = Some(children);

        let mut boxes = core::mem::take(&mut self.nodes[node].boxes);
        let moved = boxes.iter().try_for_each(|b| {
            children
                .iter()
                .try_for_each(|&child| self.insert_at(child, *b, depth + 1))
        });
        // Hand the emptied buffer back so the node keeps its allocation.
        boxes.clear();
        self.nodes[node].boxes = boxes;
        moved
    }

    fn insert_at(&mut self, node: usize, aabb: Aabb, depth: u32) -> IndexResult<()> {
        if !self.nodes[node].area.overlaps(&aabb) {
            return Ok(());
        }

        if depth + 1 >= self.config.max_depth {
            let capacity = self.config.node_capacity;
            let boxes = &mut self.nodes[node].boxes;
            if boxes.len() >= capacity {
                tracing::debug!(depth, capacity, "quadtree node full");
                return Err(IndexError::NodeFull { depth, capacity });
            }
            boxes.push(aabb);
            return Ok(());
        }

        if self.nodes[node].children.is_none()
            && self.nodes[node].boxes.len() >= self.config.max_box_count
        {
            self.subdivide(node, depth)?;
        }

        if let Some(children) = self.nodes[node].children {
            for child in children {
                self.insert_at(child, aabb, depth + 1)?;
            }
            return Ok(());
        }

        self.nodes[node].boxes.push(aabb);
        Ok(())
    }

    fn query_at(&self, node: usize, area: &Aabb, out: &mut Sequence<Aabb>) {
        let n = &self.nodes[node];
        if !n.area.overlaps(area) {
            return;
        }
        if let Some(children) = n.children {
            for child in children {
                self.query_at(child, area, out);
            }
        }
        out.extend_from_slice(&n.boxes);
    }

    fn draw_at(&self, node: usize, canvas: &mut dyn DebugCanvas) {
        let n = &self.nodes[node];
        if let Some(children) = n.children {
            for child in children {
                self.draw_at(child, canvas);
            }
        }
        canvas.stroke_rect(n.area.into());
    }
}

impl Debug for Quadtree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let live = &self.nodes[..self.in_use];
        let leaves = live.iter().filter(|n| n.children.is_none()).count();
        let entries: usize = live.iter().map(|n| n.boxes.len()).sum();
        f.debug_struct("Quadtree")
            .field("area", &self.config.area)
            .field("max_depth", &self.config.max_depth)
            .field("max_box_count", &self.config.max_box_count)
            .field("nodes", &self.in_use)
            .field("leaves", &leaves)
            .field("entries", &entries)
            .finish_non_exhaustive()
    }
}

impl SpatialIndex for Quadtree {
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()> {
        self.insert_at(0, aabb, 0)
    }

    fn query_into(&self, area: Aabb, out: &mut Sequence<Aabb>) {
        self.query_at(0, &area, out);
    }

    fn clear(&mut self) {
        self.in_use = 1;
        let area = self.config.area;
        self.nodes[0].reset(area);
    }

    fn debug_draw(&self, canvas: &mut dyn DebugCanvas) {
        self.draw_at(0, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(max_depth: u32, max_box_count: usize) -> Quadtree {
        Quadtree::new(QuadtreeConfig {
            area: Aabb::new(0.0, 0.0, 8.0, 8.0),
            max_depth,
            max_box_count,
            node_capacity: DEFAULT_NODE_CAPACITY,
        })
        .unwrap()
    }

    #[test]
    fn second_box_triggers_one_subdivision() {
        let mut t = tree(4, 1);
        let a = Aabb::new(1.0, 1.0, 1.0, 1.0);
        let b = Aabb::new(5.0, 5.0, 1.0, 1.0);
        t.insert(a).unwrap();
        assert!(!t.is_subdivided());
        assert_eq!(t.node_count(), 1);
        t.insert(b).unwrap();
        assert!(t.is_subdivided());
        assert_eq!(t.node_count(), 5);
        let hits = t.query(Aabb::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.iter().filter(|h| **h == a).count(), 1);
        assert_eq!(hits.iter().filter(|h| **h == b).count(), 1);
    }

    #[test]
    fn children_come_before_local_boxes_and_prune_by_area() {
        let mut t = tree(3, 1);
        t.insert(Aabb::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        t.insert(Aabb::new(5.0, 5.0, 1.0, 1.0)).unwrap();
        // Only the nw quadrant overlaps.
        let hits = t.query(Aabb::new(0.5, 0.5, 2.0, 2.0));
        assert_eq!(hits.as_slice(), &[Aabb::new(1.0, 1.0, 1.0, 1.0)]);
    }

    #[test]
    fn straddling_box_is_stored_per_quadrant() {
        let mut t = tree(2, 1);
        t.insert(Aabb::new(0.5, 0.5, 1.0, 1.0)).unwrap();
        t.insert(Aabb::new(3.0, 3.0, 2.0, 2.0)).unwrap();
        let hits = t.query(Aabb::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(hits.len(), 5);
    }

    #[test]
    fn last_level_overflow_is_reported() {
        let mut t = Quadtree::new(QuadtreeConfig {
            area: Aabb::new(0.0, 0.0, 8.0, 8.0),
            max_depth: 1,
            max_box_count: 2,
            node_capacity: 2,
        })
        .unwrap();
        t.insert(Aabb::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        t.insert(Aabb::new(2.0, 2.0, 1.0, 1.0)).unwrap();
        assert_eq!(
            t.insert(Aabb::new(3.0, 3.0, 1.0, 1.0)),
            Err(IndexError::NodeFull {
                depth: 0,
                capacity: 2
            })
        );
        assert!(!t.is_subdivided());
    }

    #[test]
    fn boxes_outside_the_area_are_dropped() {
        let mut t = tree(3, 4);
        t.insert(Aabb::new(20.0, 20.0, 1.0, 1.0)).unwrap();
        assert!(t.query(Aabb::new(0.0, 0.0, 100.0, 100.0)).is_empty());
    }

    #[test]
    fn clear_rewinds_and_reuses_nodes() {
        let mut t = tree(4, 1);
        for i in 0..6_u8 {
            let v = f32::from(i);
            t.insert(Aabb::new(v, v, 0.5, 0.5)).unwrap();
        }
        let grown = t.node_count();
        assert!(grown > 5);
        let reserved = t.nodes.capacity();
        t.clear();
        assert_eq!(t.node_count(), 1);
        assert!(!t.is_subdivided());
        assert!(t.query(Aabb::new(0.0, 0.0, 8.0, 8.0)).is_empty());
        t.insert(Aabb::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        t.insert(Aabb::new(5.0, 5.0, 1.0, 1.0)).unwrap();
        assert_eq!(t.node_count(), 5);
        assert_eq!(t.nodes.capacity(), reserved);
        assert_eq!(t.query(Aabb::new(0.0, 0.0, 8.0, 8.0)).len(), 2);
    }

    #[test]
    fn debug_draw_strokes_children_first() {
        let mut t = tree(4, 1);
        t.insert(Aabb::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        t.insert(Aabb::new(5.0, 5.0, 1.0, 1.0)).unwrap();
        let mut canvas: Vec<kurbo::Rect> = Vec::new();
        t.debug_draw(&mut canvas);
        assert_eq!(canvas.len(), 5);
        assert_eq!(canvas[0], kurbo::Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(canvas[4], kurbo::Rect::new(0.0, 0.0, 8.0, 8.0));
        assert_eq!(t.node_count(), 5);
    }

    #[test]
    fn rejects_bad_depth_and_threshold() {
        let base = QuadtreeConfig::default();
        for bad in [
            QuadtreeConfig {
                max_depth: 0,
                ..base
            },
            QuadtreeConfig {
                max_depth: MAX_SUPPORTED_DEPTH + 1,
                ..base
            },
            QuadtreeConfig {
                max_box_count: base.node_capacity + 1,
                ..base
            },
        ] {
            assert!(Quadtree::new(bad).is_err());
        }
    }
}
