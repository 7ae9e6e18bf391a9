//! Water-area limiting: thin out oversized water bodies, then drain puddles.
use rand::Rng;

use crate::terrain::{TerrainClass, TerrainGrid};

/// Water cells need at least this many water 8-neighbours to survive.
pub const MIN_WATER_NEIGHBORS: usize = 3;

/// Fraction of cells classified as water.
pub fn water_ratio(grid: &TerrainGrid) -> f32 {
    if grid.is_empty() {
        return 0.0;
    }
    grid.count(|c| c.class() == TerrainClass::Water) as f32 / grid.len() as f32
}

/// Reduce water to at most `ceiling` of the map and remove isolated puddles.
///
/// When the water ratio exceeds `ceiling`, each water cell is raised to flat
/// ground with probability `(ratio - ceiling) / 0.5 + 0.5`. If the draw leaves
/// the map above the ceiling, the shallowest remaining water is raised until
/// it is met. A second sweep then raises every water cell with fewer than
/// [`MIN_WATER_NEIGHBORS`] water neighbours, repeating until stable.
///
/// Returns the number of cells raised.
pub fn limit_water_areas<R: Rng>(grid: &mut TerrainGrid, ceiling: f32, rng: &mut R) -> usize {
    let total = grid.len();
    let ratio = water_ratio(grid);
    let mut raised = 0;

    if ratio > ceiling {
        let raise_chance = ((ratio - ceiling) / 0.5 + 0.5).min(1.0);
        for cell in grid.cells_mut() {
            if cell.class() == TerrainClass::Water && rng.gen::<f32>() < raise_chance {
                cell.set_height(0.0);
                raised += 1;
            }
        }

        let allowed = (ceiling.max(0.0) * total as f32).floor() as usize;
        let mut remaining: Vec<usize> = grid
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.class() == TerrainClass::Water)
            .map(|(i, _)| i)
            .collect();
        if remaining.len() > allowed {
            // Shallowest first: those are closest to becoming land anyway.
            remaining.sort_by(|&a, &b| {
                let ha = grid.cells()[a].height();
                let hb = grid.cells()[b].height();
                hb.partial_cmp(&ha).unwrap_or(std::cmp::Ordering::Equal)
            });
            let excess = remaining.len() - allowed;
            for &i in remaining.iter().take(excess) {
                grid.cells_mut()[i].set_height(0.0);
                raised += 1;
            }
        }
    }

    raised + remove_isolated_water(grid)
}

/// Raise water cells with fewer than [`MIN_WATER_NEIGHBORS`] water neighbours
/// until no such cell remains. Returns the number of cells raised.
pub fn remove_isolated_water(grid: &mut TerrainGrid) -> usize {
    let mut raised = 0;
    loop {
        let mut changed = false;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let is_water = grid.get(x, y).map_or(false, |c| c.class() == TerrainClass::Water);
                if !is_water {
                    continue;
                }
                let water_neighbors = grid.count_neighbors(x, y, |c| c.class() == TerrainClass::Water);
                if water_neighbors < MIN_WATER_NEIGHBORS {
                    if let Some(cell) = grid.get_mut(x, y) {
                        cell.set_height(0.0);
                    }
                    raised += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return raised;
        }
    }
}
