// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Strata Index: build each strategy, insert, query, draw, clear.

use strata_index::{
    Aabb, GridConfig, IndexResult, NaiveConfig, QuadtreeConfig, SpatialHashConfig, SpatialIndex,
    Strategy, StrategyConfig,
};

fn main() -> IndexResult<()> {
    let configs: [StrategyConfig; 4] = [
        NaiveConfig.into(),
        GridConfig::default().into(),
        SpatialHashConfig::default().into(),
        QuadtreeConfig::default().into(),
    ];
    let boxes = [
        Aabb::new(10.0, 10.0, 20.0, 20.0),
        Aabb::new(25.0, 25.0, 20.0, 20.0),
        Aabb::new(400.0, 300.0, 60.0, 60.0),
    ];

    for config in configs {
        let mut index = Strategy::new(config)?;
        for b in boxes {
            index.insert(b)?;
        }

        // Candidates first, then the exact hits among them.
        let area = Aabb::new(0.0, 0.0, 30.0, 30.0);
        let candidates = index.query(area);
        let hits = candidates.iter().filter(|b| b.overlaps(&area)).count();

        let mut outline: Vec<kurbo::Rect> = Vec::new();
        index.debug_draw(&mut outline);
        println!(
            "{}: {} candidates, {hits} hits, {} debug rects",
            index.name(),
            candidates.len(),
            outline.len()
        );

        index.clear();
    }
    Ok(())
}
