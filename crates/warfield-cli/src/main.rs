//! Generate a battlefield map and print it to the terminal.
//!
//! Configuration comes from an optional JSON file (`--config`) with
//! `generator`, `biome` and `palette` sections; command-line flags override
//! individual fields.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use warfield_core::backend::BackendKind;
use warfield_core::biome::coverage::Coverage;
use warfield_core::{
    BiomeConfig, BiomeGenerator, DeploymentZones, GeneratorConfig, HeightfieldGenerator, NoiseAlgorithm,
    Palette, RenderMode, TerrainBackend, TerrainClass, TerrainGrid, TerrainMap,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "warfield", about = "Generate a battlefield terrain map and print it with ANSI colours")]
struct Args {
    /// JSON file with `generator`, `biome` and `palette` sections.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Terrain backend: continuous or biome.
    #[arg(short, long, default_value = "continuous")]
    backend: BackendKind,

    /// Height-field algorithm for the continuous backend.
    #[arg(short, long)]
    algorithm: Option<NoiseAlgorithm>,

    #[arg(long)]
    seed: Option<u32>,

    /// Noise scale for the continuous backend.
    #[arg(long)]
    scale: Option<f64>,

    #[arg(long, default_value = "80")]
    width: usize,

    #[arg(long, default_value = "40")]
    height: usize,

    /// View for the continuous backend: normal, height, topo, moisture, temperature.
    #[arg(short, long, default_value = "normal")]
    mode: RenderMode,

    /// Print symbols without colour escapes.
    #[arg(long)]
    plain: bool,

    /// Print a JSON summary instead of the map.
    #[arg(long)]
    summary: bool,
}

// ── Config file ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    generator: GeneratorConfig,
    algorithm: NoiseAlgorithm,
    biome: BiomeConfig,
    palette: Palette,
}

fn load_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    let Some(path) = path else { return Ok(FileConfig::default()) };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Summary {
    backend: BackendKind,
    width: usize,
    height: usize,
    seed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    class_shares: Option<Vec<(TerrainClass, f32)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<Coverage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    satisfied: Option<bool>,
}

fn class_shares(grid: &TerrainGrid) -> Vec<(TerrainClass, f32)> {
    let total = grid.len() as f32;
    TerrainClass::ALL
        .iter()
        .map(|&class| (class, grid.count(|c| c.class() == class) as f32 / total))
        .collect()
}

fn render(map: &TerrainMap, palette: &Palette, mode: RenderMode, plain: bool) -> Result<()> {
    let (w, h) = map.dimensions();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for y in 0..h {
        for x in 0..w {
            let glyph = match map {
                TerrainMap::Continuous(grid) => grid.get(x, y).map(|c| palette.cell_glyph(c, mode)),
                TerrainMap::Biome(_) => map.glyph_at(x, y, palette),
            };
            let Some(glyph) = glyph else { continue };
            if plain {
                write!(out, "{}", glyph.symbol)?;
            } else {
                write!(out, "{glyph}")?;
            }
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("warfield=info".parse()?))
        .init();

    let args = Args::parse();
    let file = load_config(args.config.as_ref())?;

    let (map, summary) = match args.backend {
        BackendKind::Continuous => {
            let mut config = file.generator;
            if let Some(seed) = args.seed {
                config.seed = seed;
            }
            if let Some(scale) = args.scale {
                config.scale = scale;
            }
            let algorithm = args.algorithm.unwrap_or(file.algorithm);

            let grid = HeightfieldGenerator::new()
                .generate(args.width, args.height, &config, algorithm)
                .context("generating height field")?;
            let summary = Summary {
                backend: args.backend,
                width: args.width,
                height: args.height,
                seed: config.seed,
                class_shares: Some(class_shares(&grid)),
                coverage: None,
                attempts: None,
                satisfied: None,
            };
            (TerrainMap::Continuous(grid), summary)
        }
        BackendKind::Biome => {
            let mut config = file.biome;
            if let Some(seed) = args.seed {
                config.seed = seed;
            }
            let zones = DeploymentZones::new(args.width, args.height)?;
            let result = BiomeGenerator::new()
                .generate(args.width, args.height, &config, &zones)
                .context("generating biome map")?;
            let summary = Summary {
                backend: args.backend,
                width: args.width,
                height: args.height,
                seed: result.seed_used,
                class_shares: None,
                coverage: Some(result.coverage),
                attempts: Some(result.attempts),
                satisfied: Some(result.satisfied),
            };
            (TerrainMap::Biome(result.grid), summary)
        }
    };

    info!(backend = %args.backend, seed = summary.seed, "map ready");

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        render(&map, &file.palette, args.mode, args.plain)?;
    }
    Ok(())
}
