use tracing::debug;

use crate::terrain::TerrainGrid;

/// Box-blur heights `iterations` times.
///
/// Each pass replaces a cell's height with the mean of its in-bounds
/// 8-neighbours, reading only heights from the previous pass. Edge cells
/// average fewer neighbours. Classes are re-derived through
/// `TerrainCell::set_height`; flags, moisture and temperature are untouched.
pub fn smooth_terrain(grid: &mut TerrainGrid, iterations: u32) {
    if grid.len() < 2 {
        debug!("grid too small to smooth");
        return;
    }

    let mut heights: Vec<f32> = grid.cells().iter().map(|c| c.height()).collect();
    let mut next = heights.clone();
    let (w, h) = (grid.width(), grid.height());

    for _ in 0..iterations {
        for y in 0..h {
            for x in 0..w {
                let mut sum = 0.0f32;
                let mut n = 0u32;
                for (dx, dy) in crate::grid::NEIGHBORS_8 {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if grid.in_bounds(nx, ny) {
                        sum += heights[ny as usize * w + nx as usize];
                        n += 1;
                    }
                }
                next[y * w + x] = sum / n as f32;
            }
        }
        std::mem::swap(&mut heights, &mut next);
    }

    for (cell, &height) in grid.cells_mut().iter_mut().zip(&heights) {
        cell.set_height(height);
    }
}
