//! Discrete biome backend: base classification → transitions → lakes →
//! connectivity → roads → headquarters, retried until every tag has its
//! coverage floor.
pub mod base;
pub mod coverage;
pub mod lakes;
pub mod params;
pub mod roads;
pub mod transitions;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::deployment::DeploymentZones;
use crate::error::{Error, Result};
use crate::grid::{checked_cell_count, Grid};
use base::classify_base;
use coverage::{reserve_headquarters, Coverage};
use lakes::place_lakes;
use roads::build_road_network;
use transitions::{apply_transitions, optimize_connectivity};

pub use params::{BaseProbabilities, BiomeConfig, BiomeNoiseParams, LakeParams, RoadParams, TransitionParams};

/// Generation attempts before the last map is accepted as-is.
pub const MAX_ATTEMPTS: u32 = 10;

/// Terrain tag of one biome cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeTag {
    #[default]
    Plain,
    Forest,
    Mountain,
    Water,
    Road,
}

impl BiomeTag {
    pub const ALL: [BiomeTag; 5] =
        [BiomeTag::Plain, BiomeTag::Forest, BiomeTag::Mountain, BiomeTag::Water, BiomeTag::Road];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn description(self) -> &'static str {
        match self {
            BiomeTag::Plain => "plain",
            BiomeTag::Forest => "forest",
            BiomeTag::Mountain => "mountain",
            BiomeTag::Water => "water",
            BiomeTag::Road => "road",
        }
    }
}

pub type BiomeGrid = Grid<BiomeTag>;

/// Outcome of [`BiomeGenerator::generate`]. `satisfied` is false when the
/// attempt budget ran out and the last map was kept anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeGeneration {
    pub grid: BiomeGrid,
    pub attempts: u32,
    pub satisfied: bool,
    /// Seed of the attempt that produced `grid`.
    pub seed_used: u32,
    pub coverage: Coverage,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BiomeGenerator;

impl BiomeGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a biome map, retrying with `seed + 1, seed + 2, …` until every
    /// tag reaches [`coverage::MIN_COVERAGE`] or [`MAX_ATTEMPTS`] are spent.
    pub fn generate(
        &self,
        width: usize,
        height: usize,
        config: &BiomeConfig,
        zones: &DeploymentZones,
    ) -> Result<BiomeGeneration> {
        checked_cell_count(width, height)?;
        config.validate()?;
        if (zones.width(), zones.height()) != (width, height) {
            return Err(Error::InvalidConfig(format!(
                "deployment zones are {}x{} but the map is {width}x{height}",
                zones.width(),
                zones.height()
            )));
        }

        let mut grid = BiomeGrid::new(width, height, BiomeTag::Plain)?;
        let mut seed = config.seed;
        let mut attempts = 0;

        loop {
            attempts += 1;
            self.generate_once(&mut grid, config, zones, seed);
            let coverage = Coverage::measure(&grid);

            if coverage.is_satisfied() {
                info!(width, height, seed, attempts, "biome map generated");
                return Ok(BiomeGeneration { grid, attempts, satisfied: true, seed_used: seed, coverage });
            }
            if attempts >= MAX_ATTEMPTS {
                warn!(
                    width,
                    height,
                    seed,
                    attempts,
                    missing = ?coverage.missing(),
                    "coverage floor not met, keeping last attempt"
                );
                return Ok(BiomeGeneration { grid, attempts, satisfied: false, seed_used: seed, coverage });
            }

            debug!(seed, missing = ?coverage.missing(), "coverage floor not met, retrying");
            seed = seed.wrapping_add(1);
        }
    }

    /// Steps 1–6 for a single seed, overwriting every cell of `grid`.
    pub fn generate_once(&self, grid: &mut BiomeGrid, config: &BiomeConfig, zones: &DeploymentZones, seed: u32) {
        let mut rng = StdRng::seed_from_u64(u64::from(seed));

        classify_base(grid, config, seed);
        let transitioned = apply_transitions(grid, &config.transitions, &mut rng);
        let lakes = place_lakes(grid, &config.lakes, &mut rng);
        let reverted = optimize_connectivity(grid);
        build_road_network(grid, &config.roads, &mut rng);
        reserve_headquarters(grid, zones);

        debug!(seed, transitioned, lakes, reverted, "biome attempt finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverage::MIN_COVERAGE;

    fn run(width: usize, height: usize, config: &BiomeConfig) -> BiomeGeneration {
        let zones = DeploymentZones::new(width, height).unwrap();
        BiomeGenerator::new().generate(width, height, config, &zones).unwrap()
    }

    #[test]
    fn uniform_twenty_by_twenty_terminates() {
        let cfg = BiomeConfig { base_probabilities: BaseProbabilities::uniform(), ..Default::default() };
        let result = run(20, 20, &cfg);
        assert_eq!(result.grid.len(), 400);
        assert!((1..=MAX_ATTEMPTS).contains(&result.attempts));
        assert_eq!(result.seed_used, cfg.seed + result.attempts - 1);
    }

    #[test]
    fn coverage_floor_or_attempts_exhausted() {
        for seed in [0u32, 17, 99, 2024] {
            let result = run(48, 32, &BiomeConfig::default().with_seed(seed));
            if result.attempts < MAX_ATTEMPTS {
                assert!(result.satisfied);
            }
            if result.satisfied {
                for tag in BiomeTag::ALL {
                    let share = result.coverage.share(tag);
                    assert!(share >= MIN_COVERAGE, "seed {seed}: {tag:?} share {share}");
                }
            } else {
                assert_eq!(result.attempts, MAX_ATTEMPTS);
            }
            assert_eq!(result.coverage, Coverage::measure(&result.grid));
        }
    }

    #[test]
    fn impossible_quota_exhausts_attempts() {
        // A 6×5 map is mostly headquarters, so the floor can never be met.
        let result = run(6, 5, &BiomeConfig::default());
        assert!(!result.satisfied);
        assert_eq!(result.attempts, MAX_ATTEMPTS);
        assert_eq!(result.seed_used, MAX_ATTEMPTS - 1);
    }

    #[test]
    fn headquarters_are_plain() {
        let (w, h) = (30, 20);
        let result = run(w, h, &BiomeConfig::default().with_seed(5));
        let zones = DeploymentZones::new(w, h).unwrap();
        for team in crate::deployment::Team::ALL {
            for (x, y) in zones.hq_cells(team) {
                assert_eq!(result.grid.get(x, y), Some(&BiomeTag::Plain));
            }
        }
    }

    #[test]
    fn deterministic_for_a_seed() {
        let cfg = BiomeConfig::default().with_seed(77);
        assert_eq!(run(32, 24, &cfg), run(32, 24, &cfg));
    }

    #[test]
    fn mismatched_zones_rejected() {
        let zones = DeploymentZones::new(10, 10).unwrap();
        let err = BiomeGenerator.generate(12, 10, &BiomeConfig::default(), &zones);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn invalid_probabilities_rejected() {
        let mut cfg = BiomeConfig::default();
        cfg.base_probabilities.water = 0.9;
        let zones = DeploymentZones::new(10, 10).unwrap();
        assert!(BiomeGenerator.generate(10, 10, &cfg, &zones).is_err());
    }
}
