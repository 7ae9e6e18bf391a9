//! Integer lattice helpers shared by every noise function: the positional
//! hash, interpolants, corner gradients and bilinear value noise.

/// Largest value `hash` can return; used to map hashes onto `[0, 1]`.
pub const HASH_MAX: i32 = 0x7fff_ffff;

/// Deterministic integer scramble of a lattice point and seed.
///
/// The result is always in `[0, HASH_MAX]`. Arithmetic wraps, so the function
/// is total over the whole `i32` range including negative coordinates.
/// Coordinates and seed are mixed multiplicatively so that changing the seed
/// is not equivalent to translating the lattice.
#[inline]
pub fn hash(x: i32, y: i32, seed: u32) -> i32 {
    let mut h = x.wrapping_mul(374_761_393)
        ^ y.wrapping_mul(668_265_263)
        ^ (seed as i32).wrapping_mul(1_274_126_177);
    h = (h << 13) ^ h;
    let poly = h
        .wrapping_mul(h)
        .wrapping_mul(15731)
        .wrapping_add(789_221);
    h.wrapping_mul(poly).wrapping_add(1_376_312_589) & HASH_MAX
}

/// `hash` mapped onto `[0, 1]`.
#[inline]
pub fn hash_unit(x: i32, y: i32, seed: u32) -> f64 {
    hash(x, y, seed) as f64 / HASH_MAX as f64
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Smootherstep interpolant `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Eight lattice gradient directions (axis-aligned and diagonal), selected by
/// the low three hash bits.
const GRADIENTS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
];

/// Dot product of the corner gradient selected by `h` with the offset `(dx, dy)`.
#[inline]
pub fn gradient_dot(h: i32, dx: f64, dy: f64) -> f64 {
    let (gx, gy) = GRADIENTS[(h & 7) as usize];
    gx * dx + gy * dy
}

/// Lower-left lattice corner containing `(x, y)` plus the fractional offset.
#[inline]
pub fn lattice_cell(x: f64, y: f64) -> (i32, i32, f64, f64) {
    let fx = x.floor();
    let fy = y.floor();
    (fx as i32, fy as i32, x - fx, y - fy)
}

/// Bilinear interpolation of hashed corner values; output in `[-1, 1]`.
pub fn value_noise_2d(x: f64, y: f64, seed: u32) -> f64 {
    let (x0, y0, sx, sy) = lattice_cell(x, y);
    let x1 = x0.wrapping_add(1);
    let y1 = y0.wrapping_add(1);

    let n00 = hash_unit(x0, y0, seed);
    let n10 = hash_unit(x1, y0, seed);
    let n01 = hash_unit(x0, y1, seed);
    let n11 = hash_unit(x1, y1, seed);

    let top = lerp(n00, n10, sx);
    let bottom = lerp(n01, n11, sx);
    lerp(top, bottom, sy) * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_non_negative() {
        for &(x, y, s) in &[(0, 0, 0u32), (-5, 17, 42), (i32::MAX, i32::MIN, u32::MAX), (123, -456, 7)] {
            let a = hash(x, y, s);
            let b = hash(x, y, s);
            assert_eq!(a, b);
            assert!(a >= 0, "hash({x},{y},{s}) = {a} is negative");
        }
    }

    #[test]
    fn hash_depends_on_seed() {
        let differing = (0..64).filter(|&i| hash(i, i * 3, 1) != hash(i, i * 3, 2)).count();
        assert!(differing > 60, "only {differing}/64 lattice points changed with the seed");
    }

    #[test]
    fn hash_reference_values() {
        assert_eq!(hash(0, 0, 0), 1_376_312_589);
        assert_eq!(hash(1, 0, 0), 638_767_877);
        assert_eq!(hash(0, 1, 0), 529_836_373);
        assert_eq!(hash(0, 0, 1), 995_025_573);
        assert_eq!(hash(-3, 7, 42), 1_086_266_235);
        assert_eq!(hash(12345, -678, u32::MAX), 1_575_826_493);
    }

    #[test]
    fn seed_step_is_not_a_lattice_shift() {
        // An additive hash would make seed s + 1 equal seed s shifted along x.
        let shifted = (-16..16).filter(|&x| hash(x, 5, 8) == hash(x + 13, 5, 7)).count();
        assert!(shifted < 4, "{shifted}/32 points match a shifted lattice");
    }

    #[test]
    fn gradients_cover_axes_and_diagonals() {
        let dots: Vec<(f64, f64)> = (0..8).map(|h| (gradient_dot(h, 1.0, 0.0), gradient_dot(h, 0.0, 1.0))).collect();
        assert!(dots.contains(&(1.0, 0.0)) && dots.contains(&(0.0, -1.0)));
        assert!(dots.contains(&(-1.0, 1.0)) && dots.contains(&(1.0, -1.0)));
        assert_eq!(gradient_dot(8, 2.0, 3.0), gradient_dot(0, 2.0, 3.0));
    }

    #[test]
    fn fade_hits_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert!((fade(1.0) - 1.0).abs() < 1e-12);
        assert!((fade(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn value_noise_within_unit_range() {
        for i in -50..50 {
            let v = value_noise_2d(i as f64 * 0.37, i as f64 * -0.61, 9);
            assert!((-1.0..=1.0).contains(&v), "value noise {v} out of range");
        }
    }

    #[test]
    fn value_noise_matches_hash_on_lattice_points() {
        let v = value_noise_2d(3.0, -2.0, 11);
        let expected = hash_unit(3, -2, 11) * 2.0 - 1.0;
        assert!((v - expected).abs() < 1e-12);
    }
}
