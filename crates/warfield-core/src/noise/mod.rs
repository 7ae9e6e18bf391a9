//! Seeded, stateless noise primitives.
//!
//! Every function is a pure function of `(x, y, seed)`: no global state, no
//! allocation, and total over negative coordinates. Sampler structs wrap the
//! functions behind `noise::NoiseFn` so callers can hold them as trait objects.
pub mod cellular;
pub mod fbm;
pub mod lattice;
pub mod multifractal;
pub mod perlin;
pub mod simplex;
pub mod warp;

pub use cellular::{cell_noise, Cellular};
pub use fbm::{fractal_brownian_motion, Fbm};
pub use lattice::{hash, value_noise_2d};
pub use multifractal::{ridged_multi_noise, RidgedMulti};
pub use perlin::{perlin_noise, Perlin};
pub use simplex::{simplex_noise, Simplex};
pub use warp::{domain_warp, domain_warping_noise, DomainWarp};

/// Linear blend between Perlin (`seed_a`) and rescaled simplex (`seed_b`) noise.
/// `blend = 0` is pure Perlin, `blend = 1` pure simplex; output in `[0, 1]`.
pub fn blend_noise(x: f64, y: f64, blend: f64, seed_a: u32, seed_b: u32) -> f64 {
    let a = perlin_noise(x, y, seed_a);
    let b = simplex_noise(x, y, seed_b) * 0.5 + 0.5;
    lattice::lerp(a, b, blend.clamp(0.0, 1.0))
}
