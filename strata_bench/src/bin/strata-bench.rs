// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `strata-bench`: time every spatial strategy on one workload and print a JSON report.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use strata_bench::{BenchError, BenchResult, Distribution, Report, Workload, run_benchmark};
use strata_index::{
    Aabb, GridConfig, NaiveConfig, QuadtreeConfig, SpatialHashConfig, Strategy, StrategyConfig,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Naive,
    Grid,
    SpatialHash,
    Quadtree,
    All,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DistributionArg {
    Uniform,
    Clustered,
}

#[derive(Debug, Parser)]
#[command(
    name = "strata-bench",
    version,
    about = "Compare naive, grid, spatial hash and quadtree indexes"
)]
struct Cli {
    /// Strategy to run.
    #[arg(short, long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,
    /// Box counts to measure, comma separated.
    #[arg(short, long, value_delimiter = ',', default_values_t = [100_u32, 500, 1000, 2000])]
    counts: Vec<u32>,
    /// Cycles per box count.
    #[arg(short, long, default_value_t = 10)]
    iterations: u32,
    /// Spatial distribution of box origins.
    #[arg(short, long, value_enum, default_value_t = DistributionArg::Uniform)]
    distribution: DistributionArg,
    /// Cluster centres for the clustered distribution.
    #[arg(long, default_value_t = 8)]
    clusters: u32,
    /// RNG seed for the population.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// World extent as WIDTHxHEIGHT.
    #[arg(long, value_parser = parse_pair::<f32>, default_value = "800x600")]
    world_size: (f32, f32),
    /// Side length of every box.
    #[arg(long, default_value_t = 8.0)]
    box_size: f32,
    /// Grid cells as COLSxROWS; also sets the spatial hash cell size.
    #[arg(long, value_parser = parse_pair::<u32>, default_value = "16x12")]
    grid_cells: (u32, u32),
    /// Spatial hash bucket count.
    #[arg(long, default_value_t = 1024)]
    hash_buckets: usize,
    /// Quadtree depth limit, root included.
    #[arg(long, default_value_t = 6)]
    max_depth: u32,
    /// Boxes a quadtree leaf holds before it subdivides.
    #[arg(long, default_value_t = 8)]
    max_box_count: usize,
    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected AxB, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<T>()
            .map_err(|_| format!("`{v}` is not a valid number"))
    };
    Ok((parse(a)?, parse(b)?))
}

impl Cli {
    fn world(&self) -> Aabb {
        Aabb::new(0.0, 0.0, self.world_size.0, self.world_size.1)
    }

    fn workload(&self) -> Workload {
        let world = self.world();
        let distribution = match self.distribution {
            DistributionArg::Uniform => Distribution::Uniform,
            DistributionArg::Clustered => Distribution::Clustered {
                clusters: self.clusters,
                spread: world.w.min(world.h) / 10.0,
            },
        };
        Workload {
            world,
            box_size: self.box_size,
            distribution,
            seed: self.seed,
        }
    }

    fn configs(&self) -> BenchResult<Vec<StrategyConfig>> {
        let world = self.world();
        let (cols, rows) = self.grid_cells;
        if cols == 0 || rows == 0 {
            return Err(BenchError::Args("grid cells must be at least 1x1".into()));
        }
        #[allow(
            clippy::cast_precision_loss,
            reason = "Cell counts are far below f32's exact integer range."
        )]
        let (cell_w, cell_h) = (world.w / cols as f32, world.h / rows as f32);

        let naive: StrategyConfig = NaiveConfig.into();
        let grid: StrategyConfig = GridConfig {
            world,
            cols,
            rows,
            ..GridConfig::default()
        }
        .into();
        let hash: StrategyConfig = SpatialHashConfig {
            cell_w,
            cell_h,
            bucket_count: self.hash_buckets,
            view: world,
            ..SpatialHashConfig::default()
        }
        .into();
        let quadtree: StrategyConfig = QuadtreeConfig {
            area: world,
            max_depth: self.max_depth,
            max_box_count: self.max_box_count,
            ..QuadtreeConfig::default()
        }
        .into();

        Ok(match self.strategy {
            StrategyArg::Naive => vec![naive],
            StrategyArg::Grid => vec![grid],
            StrategyArg::SpatialHash => vec![hash],
            StrategyArg::Quadtree => vec![quadtree],
            StrategyArg::All => vec![naive, grid, hash, quadtree],
        })
    }
}

fn run(cli: &Cli) -> BenchResult<()> {
    if cli.counts.is_empty() {
        return Err(BenchError::Args("at least one box count is required".into()));
    }
    let workload = cli.workload();
    let mut reports: Vec<Report> = Vec::new();
    for config in cli.configs()? {
        let mut strategy = Strategy::new(config)?;
        let report = run_benchmark(&mut strategy, &workload, &cli.counts, cli.iterations)?;
        for record in &report.records {
            tracing::info!(
                strategy = %report.strategy,
                box_count = record.box_count,
                average_ms = record.average,
                min_ms = record.min,
                max_ms = record.max,
                "summary"
            );
        }
        reports.push(report);
    }

    let mut out = std::io::stdout().lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut out, &reports)?;
    } else {
        serde_json::to_writer(&mut out, &reports)?;
    }
    writeln!(out)?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}
