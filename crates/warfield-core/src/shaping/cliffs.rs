use crate::terrain::{TerrainFlags, TerrainGrid};

/// Mark `CLIFF` on every cell whose height differs from any in-bounds
/// 8-neighbour by more than `threshold`. Returns the number of cells marked.
///
/// Heights are read before any flag is written, so the result does not depend
/// on sweep order. Existing flags are never cleared.
pub fn generate_cliffs(grid: &mut TerrainGrid, threshold: f32) -> usize {
    let mut cliffs = Vec::new();
    for (x, y, cell) in grid.iter() {
        let h = cell.height();
        if grid.neighbors(x, y).any(|(_, _, n)| (n.height() - h).abs() > threshold) {
            cliffs.push((x, y));
        }
    }

    for &(x, y) in &cliffs {
        if let Some(cell) = grid.get_mut(x, y) {
            cell.flags.insert(TerrainFlags::CLIFF);
        }
    }
    cliffs.len()
}
