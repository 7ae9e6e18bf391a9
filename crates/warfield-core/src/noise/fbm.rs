//! Fractional Brownian motion: octave sums of Perlin noise.
//!
//! Octave `i` samples at `lacunarity^i` times the base frequency with weight
//! `persistence^i` and seed `seed + i`; the sum is normalised by the total
//! weight so the output stays in the `[0, 1]` range of the base noise.
use noise::NoiseFn;

use super::perlin::perlin_noise;

/// Evaluate fBm at `(x, y)`. Returns the neutral 0.5 when `octaves == 0`.
pub fn fractal_brownian_motion(
    x: f64,
    y: f64,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    seed: u32,
) -> f64 {
    let mut total = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut max_value = 0.0;

    for i in 0..octaves {
        total += perlin_noise(x * frequency, y * frequency, seed.wrapping_add(i)) * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.5
    }
}

/// [`fractal_brownian_motion`] as a `noise::NoiseFn` sampler.
#[derive(Debug, Clone, Copy)]
pub struct Fbm {
    pub seed: u32,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl Fbm {
    /// Construct with the conventional lacunarity of 2.0.
    pub fn new(seed: u32, octaves: u32, persistence: f64) -> Self {
        Self { seed, octaves, persistence, lacunarity: 2.0 }
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }
}

impl NoiseFn<f64, 2> for Fbm {
    fn get(&self, point: [f64; 2]) -> f64 {
        fractal_brownian_motion(point[0], point[1], self.octaves, self.persistence, self.lacunarity, self.seed)
    }
}
