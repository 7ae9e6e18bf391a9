//! Post-processing passes for the continuous backend: water limiting → rivers
//! → cliffs → smoothing.
pub mod cliffs;
pub mod rivers;
pub mod smooth;
pub mod water;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::terrain::TerrainGrid;
pub use cliffs::generate_cliffs;
pub use rivers::generate_rivers;
pub use smooth::smooth_terrain;
pub use water::{limit_water_areas, remove_isolated_water, water_ratio};

/// Tunables for the post-processing passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapingConfig {
    pub river_count: usize,
    pub river_min_length: usize,
    pub river_max_length: usize,
    /// Height difference above which a cell is marked as a cliff.
    pub cliff_threshold: f32,
    pub smoothing_iterations: u32,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            river_count: 5,
            river_min_length: 10,
            river_max_length: 40,
            cliff_threshold: 1.5,
            smoothing_iterations: 2,
        }
    }
}

impl ShapingConfig {
    /// No passes beyond water limiting.
    pub fn none() -> Self {
        Self { river_count: 0, smoothing_iterations: 0, cliff_threshold: f32::INFINITY, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.river_min_length > self.river_max_length {
            return Err(Error::InvalidConfig(format!(
                "river_min_length {} exceeds river_max_length {}",
                self.river_min_length, self.river_max_length
            )));
        }
        if self.cliff_threshold.is_nan() || self.cliff_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cliff_threshold must be non-negative, got {}",
                self.cliff_threshold
            )));
        }
        Ok(())
    }
}

/// What each pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ShapingReport {
    pub water_raised: usize,
    pub rivers: usize,
    pub cliffs: usize,
    pub final_water_ratio: f32,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Apply the post-processing pipeline to `grid`.
///
/// Steps:
/// 1. Water limiting to `water_ceiling`, then isolated-puddle removal.
/// 2. River tracing from high ground.
/// 3. Cliff marking.
/// 4. Smoothing.
/// 5. Water limiting again, since smoothing can open new puddles or widen lakes.
pub fn apply_shaping<R: Rng>(
    grid: &mut TerrainGrid,
    water_ceiling: f32,
    config: &ShapingConfig,
    rng: &mut R,
) -> ShapingReport {
    let mut water_raised = limit_water_areas(grid, water_ceiling, rng);
    debug!(water_raised, ratio = water_ratio(grid), "water limited");

    let rivers = generate_rivers(
        grid,
        config.river_count,
        config.river_min_length,
        config.river_max_length,
        rng,
    );
    debug!(rivers, "rivers traced");

    let cliffs = generate_cliffs(grid, config.cliff_threshold);
    debug!(cliffs, "cliffs marked");

    if config.smoothing_iterations > 0 {
        smooth_terrain(grid, config.smoothing_iterations);
        water_raised += limit_water_areas(grid, water_ceiling, rng);
        debug!(iterations = config.smoothing_iterations, "terrain smoothed");
    }

    ShapingReport { water_raised, rivers, cliffs, final_water_ratio: water_ratio(grid) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{TerrainCell, TerrainClass};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Bowl: deep water in the middle rising to mountains at the rim.
    fn make_bowl(size: usize) -> TerrainGrid {
        let mut g = TerrainGrid::new(size, size, TerrainCell::default()).unwrap();
        let c = (size - 1) as f32 / 2.0;
        for y in 0..size {
            for x in 0..size {
                let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt() / c;
                g.get_mut(x, y).unwrap().set_height(-3.0 + 8.0 * d);
            }
        }
        g
    }

    #[test]
    fn pipeline_keeps_classes_consistent() {
        let mut g = make_bowl(24);
        let mut rng = StdRng::seed_from_u64(42);
        let report = apply_shaping(&mut g, 0.1, &ShapingConfig::default(), &mut rng);
        for c in g.cells() {
            assert_eq!(c.class(), TerrainClass::from_height(c.height()));
        }
        assert!(report.final_water_ratio <= 0.1 + 1.0 / g.len() as f32);
        assert!(report.rivers <= 5);
    }

    #[test]
    fn disabled_passes_leave_dry_map_alone() {
        let mut g = TerrainGrid::new(8, 8, TerrainCell::with_height(1.0)).unwrap();
        let before = g.clone();
        let mut rng = StdRng::seed_from_u64(0);
        let report = apply_shaping(&mut g, 0.1, &ShapingConfig::none(), &mut rng);
        assert_eq!(report, ShapingReport::default());
        assert_eq!(g, before);
    }

    #[test]
    fn validate_rejects_inverted_river_lengths() {
        let cfg = ShapingConfig { river_min_length: 50, river_max_length: 10, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(Error::InvalidConfig(_))));
        assert!(ShapingConfig::default().validate().is_ok());
    }
}
