//! Step 3: lakes stamped onto open plains.
use rand::Rng;

use super::params::LakeParams;
use super::{BiomeGrid, BiomeTag};

/// Stamp square lakes on a lattice of spacing `min_distance`.
///
/// A lattice point qualifies when its whole `plain_check_radius` square lies
/// inside the map and is plain. Qualifying points get a `lake_size`-sided lake
/// centred on them with `generation_chance` percent, clipped at the map edge.
/// Returns the number of lakes stamped.
pub fn place_lakes<R: Rng>(grid: &mut BiomeGrid, params: &LakeParams, rng: &mut R) -> usize {
    if params.min_distance == 0 || params.lake_size == 0 {
        return 0;
    }

    let chance = params.generation_chance / 100.0;
    let start = params.min_distance / 2;
    let mut lakes = 0;

    for y in (start..grid.height()).step_by(params.min_distance) {
        for x in (start..grid.width()).step_by(params.min_distance) {
            if !all_plain_within(grid, x, y, params.plain_check_radius) {
                continue;
            }
            if rng.gen::<f32>() < chance {
                stamp_square(grid, x, y, params.lake_size, BiomeTag::Water);
                lakes += 1;
            }
        }
    }
    lakes
}

/// True when every cell of the `(2r+1)²` square around `(x, y)` is in bounds
/// and plain.
pub(crate) fn all_plain_within(grid: &BiomeGrid, x: usize, y: usize, radius: usize) -> bool {
    let r = radius as isize;
    let (cx, cy) = (x as isize, y as isize);
    (-r..=r).all(|dy| (-r..=r).all(|dx| grid.get_signed(cx + dx, cy + dy) == Some(&BiomeTag::Plain)))
}

/// Fill a `size × size` square centred on `(x, y)` with `tag`, clipped to the grid.
pub(crate) fn stamp_square(grid: &mut BiomeGrid, x: usize, y: usize, size: usize, tag: BiomeTag) {
    let half = (size / 2) as isize;
    let (x0, y0) = (x as isize - half, y as isize - half);
    for sy in y0..y0 + size as isize {
        for sx in x0..x0 + size as isize {
            if grid.in_bounds(sx, sy) {
                if let Some(cell) = grid.get_mut(sx as usize, sy as usize) {
                    *cell = tag;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn certain(size: usize) -> LakeParams {
        LakeParams { min_distance: 8, lake_size: size, generation_chance: 100.0, plain_check_radius: 2 }
    }

    #[test]
    fn open_plain_gets_lakes_on_lattice() {
        let mut g = BiomeGrid::new(16, 16, BiomeTag::Plain).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        // Lattice points (4,4), (12,4), (4,12), (12,12).
        assert_eq!(place_lakes(&mut g, &certain(3), &mut rng), 4);
        assert_eq!(g.count(|&&t| t == BiomeTag::Water), 36);
        assert_eq!(g.get(4, 4), Some(&BiomeTag::Water));
        assert_eq!(g.get(3, 3), Some(&BiomeTag::Water));
        assert_eq!(g.get(6, 6), Some(&BiomeTag::Plain));
    }

    #[test]
    fn non_plain_neighbourhood_blocks_lake() {
        let mut g = BiomeGrid::new(9, 9, BiomeTag::Plain).unwrap();
        *g.get_mut(6, 5).unwrap() = BiomeTag::Forest;
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(place_lakes(&mut g, &certain(3), &mut rng), 0);
    }

    #[test]
    fn check_square_must_fit_inside_map() {
        // Lattice point (4,4) with radius 5 reaches past the edge.
        let mut g = BiomeGrid::new(9, 9, BiomeTag::Plain).unwrap();
        let params = LakeParams { plain_check_radius: 5, ..certain(3) };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(place_lakes(&mut g, &params, &mut rng), 0);
    }

    #[test]
    fn zero_chance_places_nothing() {
        let mut g = BiomeGrid::new(32, 32, BiomeTag::Plain).unwrap();
        let params = LakeParams { generation_chance: 0.0, ..certain(3) };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(place_lakes(&mut g, &params, &mut rng), 0);
    }

    #[test]
    fn stamp_is_clipped_at_edges() {
        let mut g = BiomeGrid::new(4, 4, BiomeTag::Plain).unwrap();
        stamp_square(&mut g, 0, 0, 5, BiomeTag::Water);
        assert_eq!(g.count(|&&t| t == BiomeTag::Water), 9);
    }
}
