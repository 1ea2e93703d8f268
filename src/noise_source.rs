//! Seeded coherent noise used for distortion and surface detail.

use noise::{NoiseFn, OpenSimplex};

/// A deterministic 2D/3D coherent noise function returning values in roughly [-1, 1].
pub trait NoiseSource: Send + Sync {
    fn eval2(&self, x: f64, z: f64) -> f64;
    fn eval3(&self, x: f64, y: f64, z: f64) -> f64;
}

/// OpenSimplex noise with a fixed seed
#[derive(Clone, Debug)]
pub struct SimplexSource {
    seed: u32,
    simplex: OpenSimplex,
}

impl SimplexSource {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: OpenSimplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexSource {
    #[inline]
    fn eval2(&self, x: f64, z: f64) -> f64 {
        self.simplex.get([x, z])
    }

    #[inline]
    fn eval3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z])
    }
}
