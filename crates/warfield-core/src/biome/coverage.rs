//! Steps 6 and 7: headquarters reservation and per-tag coverage.
use serde::Serialize;

use crate::deployment::{DeploymentZones, Team};

use super::{BiomeGrid, BiomeTag};

/// Every tag must cover at least this share of the map.
pub const MIN_COVERAGE: f32 = 0.05;

/// Force both headquarters blocks to plain.
pub fn reserve_headquarters(grid: &mut BiomeGrid, zones: &DeploymentZones) {
    for team in Team::ALL {
        for (x, y) in zones.hq_cells(team) {
            if let Some(cell) = grid.get_mut(x, y) {
                *cell = BiomeTag::Plain;
            }
        }
    }
}

/// Share of the map held by each tag, in [`BiomeTag::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coverage {
    pub shares: [f32; 5],
}

impl Coverage {
    pub fn measure(grid: &BiomeGrid) -> Self {
        let mut counts = [0usize; 5];
        for &tag in grid.cells() {
            counts[tag.index()] += 1;
        }
        let total = grid.len().max(1) as f32;
        Self { shares: counts.map(|c| c as f32 / total) }
    }

    pub fn share(&self, tag: BiomeTag) -> f32 {
        self.shares[tag.index()]
    }

    /// Tags below [`MIN_COVERAGE`].
    pub fn missing(&self) -> Vec<BiomeTag> {
        BiomeTag::ALL.into_iter().filter(|&t| self.share(t) < MIN_COVERAGE).collect()
    }

    pub fn is_satisfied(&self) -> bool {
        self.shares.iter().all(|&s| s >= MIN_COVERAGE)
    }
}
