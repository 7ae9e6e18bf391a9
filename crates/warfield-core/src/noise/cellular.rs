//! Cell (Voronoi / Worley F1) noise.
use noise::NoiseFn;

use super::lattice::{hash_unit, lattice_cell};

/// Fraction of a lattice cell over which each feature point may wander.
const JITTER: f64 = 0.7;

/// Distance from `(x, y)` to the nearest jittered feature point in the 3×3
/// block of lattice cells around it. Always in `[0, sqrt(2)]`.
pub fn cell_noise(x: f64, y: f64, seed: u32) -> f64 {
    let (x0, y0, _, _) = lattice_cell(x, y);
    let mut min_dist = f64::INFINITY;

    for dy in -1..=1 {
        for dx in -1..=1 {
            let cx = x0.wrapping_add(dx);
            let cy = y0.wrapping_add(dy);
            let px = cx as f64 + JITTER * hash_unit(cx, cy, seed);
            let py = cy as f64 + JITTER * hash_unit(cx, cy, seed.wrapping_add(1));
            let dist = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
            min_dist = min_dist.min(dist);
        }
    }

    min_dist
}

#[derive(Debug, Clone, Copy)]
pub struct Cellular {
    pub seed: u32,
}

impl NoiseFn<f64, 2> for Cellular {
    fn get(&self, point: [f64; 2]) -> f64 {
        cell_noise(point[0], point[1], self.seed)
    }
}
