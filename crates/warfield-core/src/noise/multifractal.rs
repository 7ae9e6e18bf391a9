//! Ridged multifractal noise for mountain chains.
//!
//! Each octave folds Perlin noise around its mid-value, `1 - 2|v - 0.5|`, and
//! squares the result so ridge crests sharpen while valleys flatten out.
use noise::NoiseFn;

use super::perlin::perlin_noise;

/// Ridged multifractal sum in `[0, 1]`. Returns 0.0 when `octaves == 0`.
pub fn ridged_multi_noise(
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
        let n = perlin_noise(x * frequency, y * frequency, seed.wrapping_add(i));
        let ridge = 1.0 - 2.0 * (n - 0.5).abs();
        total += ridge * ridge * amplitude;
        max_value += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if max_value > 0.0 {
        total / max_value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RidgedMulti {
    pub seed: u32,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
}

impl NoiseFn<f64, 2> for RidgedMulti {
    fn get(&self, point: [f64; 2]) -> f64 {
        ridged_multi_noise(point[0], point[1], self.octaves, self.persistence, self.lacunarity, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_within_unit_range() {
        for r in -30..30 {
            for c in -30..30 {
                let v = ridged_multi_noise(c as f64 * 0.23, r as f64 * 0.29, 4, 0.5, 2.0, 77);
                assert!((0.0..=1.0).contains(&v), "ridged = {v}");
            }
        }
    }

    #[test]
    fn lattice_points_are_ridge_crests() {
        // Perlin is exactly 0.5 on the lattice, which folds to a ridge value of 1.
        let v = ridged_multi_noise(4.0, -3.0, 1, 0.5, 2.0, 1);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ridges_skew_high() {
        // Folding concentrates mass near the crest, so the mean sits above 0.5.
        let samples: Vec<f64> = (0..2500)
            .map(|i| ridged_multi_noise((i % 50) as f64 * 0.17 + 0.03, (i / 50) as f64 * 0.19 + 0.03, 3, 0.5, 2.0, 5))
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean > 0.5, "ridged mean {mean:.3} should exceed 0.5");
    }
}
