//! Steepest-descent river tracing from high ground.
use rand::Rng;
use tracing::debug;

use crate::terrain::{TerrainFlags, TerrainGrid};

/// Cells strictly above this height may seed a river.
pub const RIVER_SOURCE_HEIGHT: f32 = 2.0;

/// Trace up to `count` rivers and return the number actually traced.
///
/// Sources are drawn without replacement from cells above
/// [`RIVER_SOURCE_HEIGHT`]. Each river gets a length drawn uniformly from
/// `[min_len, max_len]` and walks to the lowest strictly-lower 8-neighbour,
/// marking every visited cell `RIVER` with moisture 1.0. A river stops at the
/// map edge, below sea level (height < 0), in a pit, or when its length runs out.
pub fn generate_rivers<R: Rng>(
    grid: &mut TerrainGrid,
    count: usize,
    min_len: usize,
    max_len: usize,
    rng: &mut R,
) -> usize {
    let mut sources: Vec<(usize, usize)> = grid
        .iter()
        .filter(|(_, _, c)| c.height() > RIVER_SOURCE_HEIGHT)
        .map(|(x, y, _)| (x, y))
        .collect();

    if sources.is_empty() || count == 0 {
        debug!(count, "no river sources available");
        return 0;
    }

    let rivers = count.min(sources.len());
    let (lo, hi) = if min_len <= max_len { (min_len, max_len) } else { (max_len, min_len) };

    for _ in 0..rivers {
        let pick = rng.gen_range(0..sources.len());
        let (x, y) = sources.swap_remove(pick);
        let length = rng.gen_range(lo..=hi);
        trace_river(grid, x, y, length);
    }

    rivers
}

/// Walk downhill from `(x, y)` for at most `length` cells.
fn trace_river(grid: &mut TerrainGrid, mut x: usize, mut y: usize, length: usize) {
    let (w, h) = (grid.width(), grid.height());

    for _ in 0..length {
        let Some(cell) = grid.get_mut(x, y) else { break };
        cell.flags.insert(TerrainFlags::RIVER);
        cell.moisture = 1.0;

        let current = cell.height();
        if current < 0.0 || x == 0 || y == 0 || x == w - 1 || y == h - 1 {
            break;
        }

        let mut lowest = current;
        let mut next = None;
        for (nx, ny, n) in grid.neighbors(x, y) {
            if n.height() < lowest {
                lowest = n.height();
                next = Some((nx, ny));
            }
        }

        match next {
            Some((nx, ny)) => {
                x = nx;
                y = ny;
            }
            None => break,
        }
    }
}
