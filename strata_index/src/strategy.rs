// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed set of strategies behind one value type.

use strata_collections::Sequence;

use crate::backend::{DebugCanvas, SpatialIndex};
use crate::backends::{
    Grid, GridConfig, Naive, NaiveConfig, Quadtree, QuadtreeConfig, SpatialHash,
    SpatialHashConfig,
};
use crate::error::IndexResult;
use crate::types::Aabb;

/// Construction parameters for one [`Strategy`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StrategyConfig {
    /// Build a [`Naive`] index.
    Naive(NaiveConfig),
    /// Build a [`Grid`] index.
    Grid(GridConfig),
    /// Build a [`SpatialHash`] index.
    SpatialHash(SpatialHashConfig),
    /// Build a [`Quadtree`] index.
    Quadtree(QuadtreeConfig),
}

impl StrategyConfig {
    /// Short identifier of the strategy this builds.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Naive(_) => "naive",
            Self::Grid(_) => "grid",
            Self::SpatialHash(_) => "spatial_hash",
            Self::Quadtree(_) => "quadtree",
        }
    }
}

impl From<NaiveConfig> for StrategyConfig {
    fn from(config: NaiveConfig) -> Self {
        Self::Naive(config)
    }
}

impl From<GridConfig> for StrategyConfig {
    fn from(config: GridConfig) -> Self {
        Self::Grid(config)
    }
}

impl From<SpatialHashConfig> for StrategyConfig {
    fn from(config: SpatialHashConfig) -> Self {
        Self::SpatialHash(config)
    }
}

impl From<QuadtreeConfig> for StrategyConfig {
    fn from(config: QuadtreeConfig) -> Self {
        Self::Quadtree(config)
    }
}

/// Any one of the four spatial indexes.
///
/// Callers drive it through [`SpatialIndex`] without knowing which variant
/// they hold.
#[derive(Debug)]
pub enum Strategy {
    /// Linear scan.
    Naive(Naive),
    /// Uniform grid.
    Grid(Grid),
    /// Spatial hash.
    SpatialHash(SpatialHash),
    /// Quadtree.
    Quadtree(Quadtree),
}

impl Strategy {
    /// Build the index described by `config`.
    pub fn new(config: impl Into<StrategyConfig>) -> IndexResult<Self> {
        Ok(match config.into() {
            StrategyConfig::Naive(c) => Self::Naive(Naive::new(c)),
            StrategyConfig::Grid(c) => Self::Grid(Grid::new(c)?),
            StrategyConfig::SpatialHash(c) => Self::SpatialHash(SpatialHash::new(c)?),
            StrategyConfig::Quadtree(c) => Self::Quadtree(Quadtree::new(c)?),
        })
    }

    /// Short identifier: `naive`, `grid`, `spatial_hash` or `quadtree`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Naive(_) => "naive",
            Self::Grid(_) => "grid",
            Self::SpatialHash(_) => "spatial_hash",
            Self::Quadtree(_) => "quadtree",
        }
    }

    fn as_index(&self) -> &dyn SpatialIndex {
        match self {
            Self::Naive(i) => i,
            Self::Grid(i) => i,
            Self::SpatialHash(i) => i,
            Self::Quadtree(i) => i,
        }
    }

    fn as_index_mut(&mut self) -> &mut dyn SpatialIndex {
        match self {
            Self::Naive(i) => i,
            Self::Grid(i) => i,
            Self::SpatialHash(i) => i,
            Self::Quadtree(i) => i,
        }
    }
}

impl SpatialIndex for Strategy {
    fn insert(&mut self, aabb: Aabb) -> IndexResult<()> {
        self.as_index_mut().insert(aabb)
    }

    fn query_into(&self, area: Aabb, out: &mut Sequence<Aabb>) {
        self.as_index().query_into(area, out);
    }

    fn clear(&mut self) {
        self.as_index_mut().clear();
    }

    fn debug_draw(&self, canvas: &mut dyn DebugCanvas) {
        self.as_index().debug_draw(canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IndexError;

    fn all() -> [StrategyConfig; 4] {
        [
            NaiveConfig.into(),
            GridConfig::default().into(),
            SpatialHashConfig::default().into(),
            QuadtreeConfig::default().into(),
        ]
    }

    #[test]
    fn names_match_configs() {
        for config in all() {
            let s = Strategy::new(config).unwrap();
            assert_eq!(s.name(), config.name());
        }
    }

    #[test]
    fn every_strategy_finds_what_it_stored() {
        let boxes = [
            Aabb::new(10.0, 10.0, 8.0, 8.0),
            Aabb::new(395.0, 295.0, 10.0, 10.0),
            Aabb::new(700.0, 20.0, 60.0, 5.0),
        ];
        for config in all() {
            let mut s = Strategy::new(config).unwrap();
            for b in boxes {
                s.insert(b).unwrap();
            }
            for b in boxes {
                let hits = s.query(b.inflate(1.0, 1.0));
                assert!(hits.contains(&b), "{} lost {b:?}", s.name());
            }
            s.clear();
            assert!(
                s.query(Aabb::new(0.0, 0.0, 800.0, 600.0)).is_empty(),
                "{} not empty after clear",
                s.name()
            );
        }
    }

    #[test]
    fn invalid_config_surfaces_from_new() {
        let err = Strategy::new(GridConfig {
            rows: 0,
            ..GridConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, IndexError::InvalidConfig { strategy: "grid", .. }));
    }
}
