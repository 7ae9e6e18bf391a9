//! Biome backend retry statistics over a range of seeds.
//! Runs one generation per seed in parallel and prints a JSON report with
//! per-seed attempts, coverage and the aggregate retry distribution.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warfield_core::biome::MAX_ATTEMPTS;
use warfield_core::{BiomeConfig, BiomeGenerator, BiomeTag, DeploymentZones};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "coverage_sweep", about = "Measure biome coverage retries across a seed range")]
struct Args {
    /// First seed of the sweep.
    #[arg(long, default_value = "0")]
    start: u32,

    /// Number of seeds to run.
    #[arg(short = 'n', long, default_value = "100")]
    count: u32,

    #[arg(long, default_value = "80")]
    width: usize,

    #[arg(long, default_value = "40")]
    height: usize,

    /// Biome config JSON; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

// ── Output types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SeedResult {
    seed: u32,
    seed_used: u32,
    attempts: u32,
    satisfied: bool,
    shares: [f32; 5],
}

#[derive(Serialize, Clone, Copy)]
struct Stats1 {
    mean: f32,
    min: f32,
    max: f32,
}

#[derive(Serialize)]
struct Report {
    width: usize,
    height: usize,
    seeds: u32,
    satisfied_fraction: f32,
    /// `attempt_histogram[i]` counts runs that finished on attempt `i + 1`.
    attempt_histogram: Vec<u32>,
    /// Per-tag share statistics, in `BiomeTag::ALL` order.
    tag_shares: Vec<(BiomeTag, Stats1)>,
    runs: Vec<SeedResult>,
}

fn stats(values: impl Iterator<Item = f32>) -> Stats1 {
    let (mut sum, mut n) = (0.0f32, 0usize);
    let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
    for v in values {
        sum += v;
        n += 1;
        min = min.min(v);
        max = max.max(v);
    }
    if n == 0 {
        return Stats1 { mean: 0.0, min: 0.0, max: 0.0 };
    }
    Stats1 { mean: sum / n as f32, min, max }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("warfield=warn".parse()?)
                .add_directive("coverage_sweep=info".parse()?),
        )
        .init();

    let args = Args::parse();
    if args.count == 0 {
        bail!("--count must be at least 1");
    }

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            BiomeConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => BiomeConfig::default(),
    };
    let zones = DeploymentZones::new(args.width, args.height)?;

    let seeds: Vec<u32> = (0..args.count).map(|i| args.start.wrapping_add(i)).collect();
    let runs = seeds
        .par_iter()
        .map(|&seed| -> Result<SeedResult> {
            let cfg = config.clone().with_seed(seed);
            let result = BiomeGenerator::new()
                .generate(args.width, args.height, &cfg, &zones)
                .with_context(|| format!("seed {seed}"))?;
            Ok(SeedResult {
                seed,
                seed_used: result.seed_used,
                attempts: result.attempts,
                satisfied: result.satisfied,
                shares: result.coverage.shares,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut attempt_histogram = vec![0u32; MAX_ATTEMPTS as usize];
    for r in &runs {
        attempt_histogram[(r.attempts as usize).clamp(1, MAX_ATTEMPTS as usize) - 1] += 1;
    }
    let satisfied = runs.iter().filter(|r| r.satisfied).count();
    let tag_shares = BiomeTag::ALL
        .iter()
        .map(|&tag| (tag, stats(runs.iter().map(|r| r.shares[tag.index()]))))
        .collect();

    let report = Report {
        width: args.width,
        height: args.height,
        seeds: args.count,
        satisfied_fraction: satisfied as f32 / runs.len() as f32,
        attempt_histogram,
        tag_shares,
        runs,
    };
    info!(seeds = args.count, satisfied, "sweep complete");

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
