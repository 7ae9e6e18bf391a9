//! Steps 2 and 4: neighbour-count transitions and connectivity clean-up.
use rand::Rng;

use super::params::TransitionParams;
use super::{BiomeGrid, BiomeTag};

/// One smoothing pass over interior cells.
///
/// Neighbour counts come from the grid as it was before the pass. Forest and
/// mountain give way to plain when surrounded by enough plain; otherwise plain
/// may grow into mountain, then forest, each with `transition_chance` percent.
/// A cell changes at most once. Returns the number of changed cells.
pub fn apply_transitions<R: Rng>(grid: &mut BiomeGrid, params: &TransitionParams, rng: &mut R) -> usize {
    let (w, h) = (grid.width(), grid.height());
    if w < 3 || h < 3 {
        return 0;
    }

    let chance = params.transition_chance / 100.0;
    let snapshot = grid.clone();
    let mut changed = 0;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let Some(&tag) = snapshot.get(x, y) else { continue };
            let plains = snapshot.count_neighbors(x, y, |&t| t == BiomeTag::Plain);

            let next = match tag {
                BiomeTag::Forest | BiomeTag::Mountain if plains >= params.plain_threshold => BiomeTag::Plain,
                BiomeTag::Plain => {
                    let mountains = snapshot.count_neighbors(x, y, |&t| t == BiomeTag::Mountain);
                    let forests = snapshot.count_neighbors(x, y, |&t| t == BiomeTag::Forest);
                    if mountains >= params.mountain_threshold && rng.gen::<f32>() < chance {
                        BiomeTag::Mountain
                    } else if forests >= params.forest_threshold && rng.gen::<f32>() < chance {
                        BiomeTag::Forest
                    } else {
                        BiomeTag::Plain
                    }
                }
                other => other,
            };

            if next != tag {
                if let Some(cell) = grid.get_mut(x, y) {
                    *cell = next;
                    changed += 1;
                }
            }
        }
    }
    changed
}

/// Revert under-connected water, mountain and forest cells to plain.
///
/// Water needs two water neighbours, mountain and forest one of their own
/// kind. Classes are processed in that order, each sweep updating in place.
/// Returns the number of reverted cells.
pub fn optimize_connectivity(grid: &mut BiomeGrid) -> usize {
    [(BiomeTag::Water, 2), (BiomeTag::Mountain, 1), (BiomeTag::Forest, 1)]
        .into_iter()
        .map(|(tag, min)| revert_sparse(grid, tag, min))
        .sum()
}

fn revert_sparse(grid: &mut BiomeGrid, tag: BiomeTag, min_neighbors: usize) -> usize {
    let mut reverted = 0;
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y) != Some(&tag) {
                continue;
            }
            if grid.count_neighbors(x, y, |&t| t == tag) < min_neighbors {
                if let Some(cell) = grid.get_mut(x, y) {
                    *cell = BiomeTag::Plain;
                    reverted += 1;
                }
            }
        }
    }
    reverted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_from(rows: &[&str]) -> BiomeGrid {
        let mut g = BiomeGrid::new(rows[0].len(), rows.len(), BiomeTag::Plain).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                *g.get_mut(x, y).unwrap() = match ch {
                    'F' => BiomeTag::Forest,
                    'M' => BiomeTag::Mountain,
                    'W' => BiomeTag::Water,
                    'R' => BiomeTag::Road,
                    _ => BiomeTag::Plain,
                };
            }
        }
        g
    }

    #[test]
    fn surrounded_forest_becomes_plain() {
        let mut g = grid_from(&["...", ".F.", "..."]);
        let mut rng = StdRng::seed_from_u64(0);
        let params = TransitionParams::default();
        assert_eq!(apply_transitions(&mut g, &params, &mut rng), 1);
        assert_eq!(g.get(1, 1), Some(&BiomeTag::Plain));
    }

    #[test]
    fn edges_are_never_touched() {
        let mut g = grid_from(&["F..", "...", "..M"]);
        let mut rng = StdRng::seed_from_u64(0);
        apply_transitions(&mut g, &TransitionParams::default(), &mut rng);
        assert_eq!(g.get(0, 0), Some(&BiomeTag::Forest));
        assert_eq!(g.get(2, 2), Some(&BiomeTag::Mountain));
    }

    #[test]
    fn certain_chance_grows_mountain_before_forest() {
        let mut g = grid_from(&["MMM", "M.F", "FFF"]);
        let params = TransitionParams {
            plain_threshold: 9,
            mountain_threshold: 4,
            forest_threshold: 4,
            transition_chance: 100.0,
        };
        let mut rng = StdRng::seed_from_u64(0);
        apply_transitions(&mut g, &params, &mut rng);
        assert_eq!(g.get(1, 1), Some(&BiomeTag::Mountain));
    }

    #[test]
    fn zero_chance_never_grows() {
        let mut g = grid_from(&["MMM", "M.M", "MMM"]);
        let params = TransitionParams { transition_chance: 0.0, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(apply_transitions(&mut g, &params, &mut rng), 0);
    }

    #[test]
    fn connectivity_reverts_isolated_cells() {
        let mut g = grid_from(&[
            "W....",
            "..M..",
            "....F",
            "WW...",
            "WW.FF",
        ]);
        let reverted = optimize_connectivity(&mut g);
        assert_eq!(reverted, 3);
        assert_eq!(g.get(0, 0), Some(&BiomeTag::Plain));
        assert_eq!(g.get(2, 1), Some(&BiomeTag::Plain));
        assert_eq!(g.get(4, 2), Some(&BiomeTag::Plain));
        assert_eq!(g.get(3, 4), Some(&BiomeTag::Forest));
        assert_eq!(g.count(|&&t| t == BiomeTag::Water), 4);
    }

    #[test]
    fn water_pass_cascades_in_place() {
        // Sweeping left to right, each reverted cell strands the next one.
        let mut g = grid_from(&["WWW.", "....", "...."]);
        optimize_connectivity(&mut g);
        assert_eq!(g.count(|&&t| t == BiomeTag::Water), 0);
    }
}
