//! Domain warping: displace the sample point through two independent Perlin
//! fields before evaluating a third, giving non-axis-aligned distortion.
use noise::NoiseFn;

use super::perlin::perlin_noise;

/// Displace `(x, y)` by up to `warp_strength` along each axis.
///
/// The x and y offsets use seeds `seed` and `seed + 1` with decorrelating
/// coordinate shifts.
pub fn domain_warp(x: f64, y: f64, warp_strength: f64, seed: u32) -> (f64, f64) {
    let warp_x = perlin_noise(x + 5.2, y + 1.3, seed) * 2.0 - 1.0;
    let warp_y = perlin_noise(x + 8.7, y + 2.8, seed.wrapping_add(1)) * 2.0 - 1.0;
    (x + warp_x * warp_strength, y + warp_y * warp_strength)
}

/// Perlin noise (seed `seed + 2`) sampled at the warped point; output in `[0, 1]`.
pub fn domain_warping_noise(x: f64, y: f64, warp_strength: f64, seed: u32) -> f64 {
    let (wx, wy) = domain_warp(x, y, warp_strength, seed);
    perlin_noise(wx, wy, seed.wrapping_add(2))
}

#[derive(Debug, Clone, Copy)]
pub struct DomainWarp {
    pub seed: u32,
    pub warp_strength: f64,
}

impl NoiseFn<f64, 2> for DomainWarp {
    fn get(&self, point: [f64; 2]) -> f64 {
        domain_warping_noise(point[0], point[1], self.warp_strength, self.seed)
    }
}
