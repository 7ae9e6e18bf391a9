//! Continuous-height backend: noise sampling → height field → classification
//! → shaping passes.
use std::fmt;
use std::str::FromStr;

use noise::NoiseFn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::grid::checked_cell_count;
use crate::noise::{DomainWarp, Fbm, Perlin, RidgedMulti, Simplex};
use crate::shaping::{apply_shaping, limit_water_areas, smooth_terrain, ShapingConfig};
use crate::terrain::{TerrainCell, TerrainGrid};

// ── Algorithm selection ───────────────────────────────────────────────────────

/// Height-field sampler used by [`HeightfieldGenerator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoiseAlgorithm {
    Perlin,
    #[default]
    FractalBrownian,
    DomainWarping,
    RidgedMulti,
    Simplex,
}

impl NoiseAlgorithm {
    pub const ALL: [NoiseAlgorithm; 5] = [
        NoiseAlgorithm::Perlin,
        NoiseAlgorithm::FractalBrownian,
        NoiseAlgorithm::DomainWarping,
        NoiseAlgorithm::RidgedMulti,
        NoiseAlgorithm::Simplex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NoiseAlgorithm::Perlin => "perlin",
            NoiseAlgorithm::FractalBrownian => "fractal-brownian",
            NoiseAlgorithm::DomainWarping => "domain-warping",
            NoiseAlgorithm::RidgedMulti => "ridged-multi",
            NoiseAlgorithm::Simplex => "simplex",
        }
    }

    /// Build the `[0, 1]` sampler for this algorithm from `config`.
    pub fn sampler(self, config: &GeneratorConfig) -> Box<dyn NoiseFn<f64, 2>> {
        let seed = config.seed;
        match self {
            NoiseAlgorithm::Perlin => Box::new(Perlin::new(seed)),
            NoiseAlgorithm::FractalBrownian => Box::new(
                Fbm::new(seed, config.octaves, config.persistence).with_lacunarity(config.lacunarity),
            ),
            NoiseAlgorithm::DomainWarping => {
                Box::new(DomainWarp { seed, warp_strength: config.warp_strength })
            }
            NoiseAlgorithm::RidgedMulti => Box::new(RidgedMulti {
                seed,
                octaves: config.octaves,
                persistence: config.persistence,
                lacunarity: config.lacunarity,
            }),
            NoiseAlgorithm::Simplex => Box::new(Simplex::new(seed)),
        }
    }
}

impl fmt::Display for NoiseAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "perlin" => Ok(NoiseAlgorithm::Perlin),
            "fbm" | "fractal-brownian" => Ok(NoiseAlgorithm::FractalBrownian),
            "warp" | "domain-warping" => Ok(NoiseAlgorithm::DomainWarping),
            "ridged" | "ridged-multi" => Ok(NoiseAlgorithm::RidgedMulti),
            "simplex" => Ok(NoiseAlgorithm::Simplex),
            _ => Err(Error::InvalidConfig(format!("unknown noise algorithm '{s}'"))),
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Parameters for one continuous-height generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Noise-space extent of the whole map along each axis.
    pub scale: f64,
    pub seed: u32,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub height_multiplier: f32,
    pub height_offset: f32,
    pub warp_strength: f64,
    /// Largest fraction of cells allowed to stay water.
    pub water_ceiling: f32,
    pub shaping: ShapingConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            scale: 5.0,
            seed: 0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            height_multiplier: 4.0,
            height_offset: 2.0,
            warp_strength: 1.0,
            water_ceiling: 0.10,
            shaping: ShapingConfig::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::InvalidConfig(format!("scale must be positive, got {}", self.scale)));
        }
        if self.octaves == 0 {
            return Err(Error::InvalidConfig("octaves must be at least 1".into()));
        }
        if !self.persistence.is_finite() || self.persistence < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "persistence must be non-negative, got {}",
                self.persistence
            )));
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "lacunarity must be positive, got {}",
                self.lacunarity
            )));
        }
        if !self.height_multiplier.is_finite() || !self.height_offset.is_finite() {
            return Err(Error::InvalidConfig("height multiplier and offset must be finite".into()));
        }
        if !self.warp_strength.is_finite() {
            return Err(Error::InvalidConfig("warp_strength must be finite".into()));
        }
        if !(0.0..=1.0).contains(&self.water_ceiling) {
            return Err(Error::InvalidConfig(format!(
                "water_ceiling must be within [0, 1], got {}",
                self.water_ceiling
            )));
        }
        self.shaping.validate()
    }
}

// ── Generator ─────────────────────────────────────────────────────────────────

/// Continuous-height terrain generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeightfieldGenerator;

impl HeightfieldGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a `width × height` terrain grid.
    ///
    /// Pipeline:
    ///   1. Validate dimensions and config; nothing is allocated on failure.
    ///   2. Sample the selected noise at `(x / width * scale, y / height * scale)`.
    ///   3. Map `v ∈ [0, 1]` to `(v * 2 - 1) * multiplier + offset`, clamp, classify.
    ///   4. Shaping passes (water, rivers, cliffs, smoothing).
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        config: &GeneratorConfig,
        algorithm: NoiseAlgorithm,
    ) -> Result<TerrainGrid> {
        checked_cell_count(width, height)?;
        config.validate()?;

        let mut grid = self.sample_heights(width, height, config, algorithm)?;

        let mut rng = StdRng::seed_from_u64(u64::from(config.seed));
        let report = apply_shaping(&mut grid, config.water_ceiling, &config.shaping, &mut rng);

        info!(
            width,
            height,
            seed = config.seed,
            %algorithm,
            rivers = report.rivers,
            cliffs = report.cliffs,
            water_ratio = report.final_water_ratio,
            "terrain generated"
        );
        Ok(grid)
    }

    /// Steps 1–3 only: the raw classified height field without shaping.
    pub fn sample_heights(
        &self,
        width: usize,
        height: usize,
        config: &GeneratorConfig,
        algorithm: NoiseAlgorithm,
    ) -> Result<TerrainGrid> {
        let mut grid = TerrainGrid::new(width, height, TerrainCell::default())?;
        let sampler = algorithm.sampler(config);
        let (w, h) = (width as f64, height as f64);

        for y in 0..height {
            for x in 0..width {
                let nx = x as f64 / w * config.scale;
                let ny = y as f64 / h * config.scale;
                let v = sampler.get([nx, ny]) as f32;
                if let Some(cell) = grid.get_mut(x, y) {
                    cell.set_height((v * 2.0 - 1.0) * config.height_multiplier + config.height_offset);
                }
            }
        }
        debug!(width, height, %algorithm, "height field sampled");
        Ok(grid)
    }
}

/// Quick fBm terrain with default parameters: water limited to the default
/// ceiling, then two smoothing passes. No rivers or cliffs.
pub fn generate_terrain(width: usize, height: usize, scale: f64, seed: u32) -> Result<TerrainGrid> {
    let config = GeneratorConfig { scale, seed, ..GeneratorConfig::default() };
    generate_terrain_with(width, height, &config)
}

/// [`generate_terrain`] with an explicit config; only the height and water
/// fields are used.
pub fn generate_terrain_with(width: usize, height: usize, config: &GeneratorConfig) -> Result<TerrainGrid> {
    config.validate()?;
    let mut grid =
        HeightfieldGenerator.sample_heights(width, height, config, NoiseAlgorithm::FractalBrownian)?;

    let mut rng = StdRng::seed_from_u64(u64::from(config.seed));
    limit_water_areas(&mut grid, config.water_ceiling, &mut rng);
    smooth_terrain(&mut grid, 2);
    // Averaging can pull land below sea level again.
    limit_water_areas(&mut grid, config.water_ceiling, &mut rng);
    Ok(grid)
}
