// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seeded box populations.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strata_collections::Sequence;
use strata_index::Aabb;

/// How box origins are spread over the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Distribution {
    /// Uniform over the whole world.
    Uniform,
    /// Gathered around `clusters` random centres, roughly within `spread` of each.
    Clustered {
        /// Number of cluster centres. Zero falls back to uniform.
        clusters: u32,
        /// Distance from a centre that most boxes stay within.
        spread: f32,
    },
}

/// Recipe for a reproducible population of equally sized square boxes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Workload {
    /// Region every box lies in.
    pub world: Aabb,
    /// Side length of each box.
    pub box_size: f32,
    /// Origin distribution.
    pub distribution: Distribution,
    /// RNG seed; the same seed always yields the same boxes.
    pub seed: u64,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            world: Aabb::new(0.0, 0.0, 800.0, 600.0),
            box_size: 8.0,
            distribution: Distribution::Uniform,
            seed: 0x5eed,
        }
    }
}

impl Workload {
    /// Generate `count` boxes.
    pub fn boxes(&self, count: usize) -> Sequence<Aabb> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let size = self.box_size;
        let (x_lo, y_lo) = (self.world.min_x(), self.world.min_y());
        let x_hi = (self.world.max_x() - size).max(x_lo);
        let y_hi = (self.world.max_y() - size).max(y_lo);
        let mut out = Sequence::with_capacity(count);

        match self.distribution {
            Distribution::Clustered { clusters, spread } if clusters > 0 => {
                let centres: Vec<(f32, f32)> = (0..clusters)
                    .map(|_| (uniform(&mut rng, x_lo, x_hi), uniform(&mut rng, y_lo, y_hi)))
                    .collect();
                for _ in 0..count {
                    let (cx, cy) = centres[rng.random_range(0..centres.len())];
                    let x = (cx + bell(&mut rng) * spread).clamp(x_lo, x_hi);
                    let y = (cy + bell(&mut rng) * spread).clamp(y_lo, y_hi);
                    out.push(Aabb::new(x, y, size, size));
                }
            }
            _ => {
                for _ in 0..count {
                    let x = uniform(&mut rng, x_lo, x_hi);
                    let y = uniform(&mut rng, y_lo, y_hi);
                    out.push(Aabb::new(x, y, size, size));
                }
            }
        }
        out
    }
}

fn uniform(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Mean of three uniforms on `[-1, 1)`: bell-shaped, bounded to `[-1, 1)`.
fn bell(rng: &mut StdRng) -> f32 {
    let mut sum = 0.0;
    for _ in 0..3 {
        sum += rng.random_range(-1.0..1.0_f32);
    }
    sum / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside(world: &Aabb, b: &Aabb) -> bool {
        b.min_x() >= world.min_x()
            && b.min_y() >= world.min_y()
            && b.max_x() <= world.max_x()
            && b.max_y() <= world.max_y()
    }

    #[test]
    fn same_seed_same_boxes() {
        let w = Workload::default();
        assert_eq!(w.boxes(64), w.boxes(64));
        let other = Workload { seed: 7, ..w };
        assert_ne!(w.boxes(64), other.boxes(64));
    }

    #[test]
    fn uniform_boxes_stay_in_world() {
        let w = Workload::default();
        let boxes = w.boxes(500);
        assert_eq!(boxes.len(), 500);
        assert!(boxes.iter().all(|b| inside(&w.world, b)));
    }

    #[test]
    fn clustered_boxes_are_clamped_into_world() {
        let w = Workload {
            distribution: Distribution::Clustered {
                clusters: 3,
                spread: 2000.0,
            },
            ..Workload::default()
        };
        let boxes = w.boxes(500);
        assert!(boxes.iter().all(|b| inside(&w.world, b)));
    }

    #[test]
    fn clusters_are_tighter_than_uniform() {
        let clustered = Workload {
            distribution: Distribution::Clustered {
                clusters: 1,
                spread: 10.0,
            },
            ..Workload::default()
        }
        .boxes(200);
        let first = clustered[0];
        // Every box lies within two spreads of the first one.
        assert!(
            clustered
                .iter()
                .all(|b| (b.x - first.x).abs() <= 20.0 && (b.y - first.y).abs() <= 20.0)
        );
    }

    #[test]
    fn oversized_boxes_pin_to_origin() {
        let w = Workload {
            world: Aabb::new(5.0, 5.0, 4.0, 4.0),
            box_size: 10.0,
            ..Workload::default()
        };
        assert!(w.boxes(3).iter().all(|b| b.x == 5.0 && b.y == 5.0));
    }
}
