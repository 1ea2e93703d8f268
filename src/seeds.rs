//! Seed management for density generation
//!
//! A single master seed expands into independent sub-seeds for each island layer
//! and both noise sources. Individual sub-seeds can be overridden for experimentation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Sub-seeds for every seeded component of a terrain generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Large island layer
    pub large: u32,
    /// Medium island layer
    pub medium: u32,
    /// Small island layer
    pub small: u32,
    /// First noise source (distortion octaves 1 and 3, fine detail 1 and 3)
    pub noise_a: u32,
    /// Second noise source
    pub noise_b: u32,
}

impl GeneratorSeeds {
    /// Expand a master seed into sub-seeds.
    ///
    /// The draws happen in a fixed order from one ChaCha stream, so the
    /// same master always yields the same set.
    pub fn from_master(master: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(master);
        Self {
            master,
            large: rng.gen(),
            medium: rng.gen(),
            small: rng.gen(),
            noise_a: rng.gen(),
            noise_b: rng.gen(),
        }
    }

    /// Create a builder for customizing individual seeds
    pub fn builder(master: u64) -> GeneratorSeedsBuilder {
        GeneratorSeedsBuilder::new(master)
    }
}

impl Default for GeneratorSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Builder for overriding individual sub-seeds while deriving the rest from master
pub struct GeneratorSeedsBuilder {
    seeds: GeneratorSeeds,
}

impl GeneratorSeedsBuilder {
    pub fn new(master: u64) -> Self {
        Self {
            seeds: GeneratorSeeds::from_master(master),
        }
    }

    pub fn large(mut self, seed: u32) -> Self {
        self.seeds.large = seed;
        self
    }

    pub fn medium(mut self, seed: u32) -> Self {
        self.seeds.medium = seed;
        self
    }

    pub fn small(mut self, seed: u32) -> Self {
        self.seeds.small = seed;
        self
    }

    pub fn noise_a(mut self, seed: u32) -> Self {
        self.seeds.noise_a = seed;
        self
    }

    pub fn noise_b(mut self, seed: u32) -> Self {
        self.seeds.noise_b = seed;
        self
    }

    pub fn build(self) -> GeneratorSeeds {
        self.seeds
    }
}

/// splitmix64-style mixing of a seed with cell coordinates
pub fn cell_seed(seed: u64, cell_x: i32, cell_z: i32) -> u64 {
    let mut hash = seed;

    hash = hash.wrapping_add(cell_x as i64 as u64);
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xbf58476d1ce4e5b9);

    hash = hash.wrapping_add(cell_z as i64 as u64);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94d049bb133111eb);

    hash ^ (hash >> 31)
}

impl std::fmt::Display for GeneratorSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GeneratorSeeds {{ master: {}, large: {}, medium: {}, small: {}, \
             noise_a: {}, noise_b: {} }}",
            self.master, self.large, self.medium, self.small, self.noise_a, self.noise_b,
        )
    }
}
