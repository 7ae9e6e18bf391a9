//! Gradient (Perlin) noise on the hashed integer lattice.
use noise::NoiseFn;

use super::lattice::{fade, gradient_dot, hash, lattice_cell, lerp};

/// Raw gradient noise in approximately `[-1, 1]`.
///
/// Corner gradients come from the positional hash; the four dot products are
/// blended with the smootherstep interpolant.
pub fn perlin_signed(x: f64, y: f64, seed: u32) -> f64 {
    let (x0, y0, sx, sy) = lattice_cell(x, y);
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);

    let u = fade(sx);
    let v = fade(sy);

    let g00 = gradient_dot(hash(x0, y0, seed), sx, sy);
    let g10 = gradient_dot(hash(x1, y0, seed), sx - 1.0, sy);
    let g01 = gradient_dot(hash(x0, y1, seed), sx, sy - 1.0);
    let g11 = gradient_dot(hash(x1, y1, seed), sx - 1.0, sy - 1.0);

    let top = lerp(g00, g10, u);
    let bottom = lerp(g01, g11, u);
    lerp(top, bottom, v)
}

/// Perlin noise rescaled to `[0, 1]`.
#[inline]
pub fn perlin_noise(x: f64, y: f64, seed: u32) -> f64 {
    (perlin_signed(x, y, seed) * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// [`perlin_noise`] as a `noise::NoiseFn` sampler.
#[derive(Debug, Clone, Copy)]
pub struct Perlin {
    pub seed: u32,
}

impl Perlin {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl NoiseFn<f64, 2> for Perlin {
    fn get(&self, point: [f64; 2]) -> f64 {
        perlin_noise(point[0], point[1], self.seed)
    }
}
