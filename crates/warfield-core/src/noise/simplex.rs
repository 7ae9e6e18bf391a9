//! 2D simplex noise over the same hashed lattice as [`super::perlin`].
use noise::NoiseFn;

use super::lattice::{gradient_dot, hash};

const F2: f64 = 0.366_025_403_784_438_6; // (sqrt(3) - 1) / 2
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

#[inline]
fn corner(h: i32, dx: f64, dy: f64) -> f64 {
    let t = 0.5 - dx * dx - dy * dy;
    if t <= 0.0 {
        0.0
    } else {
        let t2 = t * t;
        t2 * t2 * gradient_dot(h, dx, dy)
    }
}

/// Simplex noise in `[-1, 1]`.
pub fn simplex_noise(x: f64, y: f64, seed: u32) -> f64 {
    let s = (x + y) * F2;
    let i = (x + s).floor() as i32;
    let j = (y + s).floor() as i32;

    let t = i.wrapping_add(j) as f64 * G2;
    let x0 = x - (i as f64 - t);
    let y0 = y - (j as f64 - t);

    let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

    let x1 = x0 - i1 as f64 + G2;
    let y1 = y0 - j1 as f64 + G2;
    let x2 = x0 - 1.0 + 2.0 * G2;
    let y2 = y0 - 1.0 + 2.0 * G2;

    let n0 = corner(hash(i, j, seed), x0, y0);
    let n1 = corner(hash(i.wrapping_add(i1), j.wrapping_add(j1), seed), x1, y1);
    let n2 = corner(hash(i.wrapping_add(1), j.wrapping_add(1), seed), x2, y2);

    (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
}

/// [`simplex_noise`] rescaled to `[0, 1]` as a `noise::NoiseFn` sampler.
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    pub seed: u32,
}

impl Simplex {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl NoiseFn<f64, 2> for Simplex {
    fn get(&self, point: [f64; 2]) -> f64 {
        simplex_noise(point[0], point[1], self.seed) * 0.5 + 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplex_within_signed_unit_range() {
        for r in -40..40 {
            for c in -40..40 {
                let v = simplex_noise(c as f64 * 0.21, r as f64 * 0.19, 17);
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn sampler_is_rescaled() {
        let s = Simplex::new(3);
        for i in 0..100 {
            let v = s.get([i as f64 * 0.3, i as f64 * 0.7]);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
