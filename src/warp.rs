//! Horizontal domain warp applied before island lookups.
//!
//! Each axis sums three octaves drawn alternately from the two noise sources,
//! and the two axes use opposite orders (A,B,A against B,A,B).

use crate::noise_source::NoiseSource;

/// (frequency, amplitude) per octave
const OCTAVES: [(f64, f64); 3] = [(0.1, 20.0), (0.2, 10.0), (0.4, 5.0)];

/// Warp offsets `(dx, dz)` for an integer column.
pub fn distortion<N: NoiseSource + ?Sized>(noise_a: &N, noise_b: &N, x: i32, z: i32) -> (f64, f64) {
    let (fx, fz) = (x as f64, z as f64);
    let [(f1, a1), (f2, a2), (f3, a3)] = OCTAVES;

    let dx = noise_a.eval2(fx * f1, fz * f1) * a1
        + noise_b.eval2(fx * f2, fz * f2) * a2
        + noise_a.eval2(fx * f3, fz * f3) * a3;
    let dz = noise_b.eval2(fx * f1, fz * f1) * a1
        + noise_a.eval2(fx * f2, fz * f2) * a2
        + noise_b.eval2(fx * f3, fz * f3) * a3;
    (dx, dz)
}

/// Distorted horizontal position of column `(x, z)` sampled every `scale_xz` blocks.
pub fn warp_column<N: NoiseSource + ?Sized>(
    noise_a: &N,
    noise_b: &N,
    x: i32,
    z: i32,
    scale_xz: f64,
) -> (f64, f64) {
    let (dx, dz) = distortion(noise_a, noise_b, x, z);
    (x as f64 * scale_xz + dx, z as f64 * scale_xz + dz)
}
