//! Step 1: noise-driven base classification.
use crate::noise::fractal_brownian_motion;

use super::params::BiomeConfig;
use super::{BiomeGrid, BiomeTag};

/// Fill `grid` from layered noise using cumulative probability bands.
///
/// The remap to `[0, 1]` is a global quantile remap over the whole field, not
/// a per-sample one: each cell's value is its rank among all samples of this
/// attempt divided by the cell count. A cell's tag therefore depends on every
/// other sample, and band `i` covers `probability[i]` of the map up to one
/// cell of rounding. The noise only decides which cells fall in which band,
/// which keeps the bands spatially coherent.
pub fn classify_base(grid: &mut BiomeGrid, config: &BiomeConfig, seed: u32) {
    let n = &config.noise;
    let samples: Vec<f64> = grid
        .iter()
        .map(|(x, y, _)| {
            fractal_brownian_motion(
                x as f64 * n.base_frequency,
                y as f64 * n.base_frequency,
                n.noise_layers,
                n.persistence,
                n.lacunarity,
                seed,
            )
        })
        .collect();

    let ranks = rank_normalize(&samples);
    for (cell, r) in grid.cells_mut().iter_mut().zip(ranks) {
        *cell = config.base_probabilities.pick(r);
    }
}

/// Map each value to `rank / len` in `[0, 1)`; ties keep their index order.
/// Only the order of `values` matters, never their magnitude.
fn rank_normalize(values: &[f64]) -> Vec<f32> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let len = values.len().max(1) as f32;
    let mut ranks = vec![0.0; values.len()];
    for (rank, &i) in order.iter().enumerate() {
        ranks[i] = rank as f32 / len;
    }
    ranks
}
