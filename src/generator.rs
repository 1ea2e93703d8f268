//! Terrain generator: fills per-column density buffers for floating islands.
//!
//! One call to [`TerrainGenerator::fill_density`] handles one column:
//!
//! 1. Reset the three island layer caches
//! 2. Map the world position onto the island grid and warp it horizontally
//! 3. Refresh every layer for the warped column
//! 4. Compute the column height scalar once (biome kernel, or a constant in fast mode)
//! 5. For each vertical sample, max-combine the layers and add fine surface detail
//!
//! A generator owns mutable layer caches and must not be shared between
//! threads; parallel callers build one generator per worker.

use std::sync::Arc;

use log::{debug, trace};

use crate::biome::{BiomeLookup, BiomeRegistry};
use crate::config::GeneratorOptions;
use crate::error::TerrainError;
use crate::height_kernel::HeightKernel;
use crate::island::{GridIslandLayer, IslandLayer};
use crate::noise_source::{NoiseSource, SimplexSource};
use crate::seeds::GeneratorSeeds;
use crate::warp::warp_column;

/// Height scalar used in fast mode
pub const FAST_HEIGHT: f32 = 0.2;

/// Columns whose own biome is flatter than this skip the kernel entirely
const BARREN_THRESHOLD: f32 = 0.1;

/// Once the running maximum exceeds this, later layers are not consulted
const SATURATION: f32 = 1.0;

/// Fine detail is only added above this density
const DETAIL_GATE: f32 = -0.5;

#[derive(Clone, Copy)]
enum Detail {
    A,
    B,
}

/// (source, frequency, amplitude); each octave adds `noise * amp + amp`
const DETAIL_OCTAVES: [(Detail, f64, f64); 3] = [
    (Detail::A, 0.01, 0.02),
    (Detail::B, 0.05, 0.01),
    (Detail::A, 0.1, 0.005),
];

/// Storage encoding of a density buffer.
///
/// Densities are computed in single precision; the encoding only decides how
/// the finished value is stored.
pub trait DensitySample: Copy {
    fn from_density(value: f32) -> Self;
}

impl DensitySample for f64 {
    #[inline]
    fn from_density(value: f32) -> Self {
        value as f64
    }
}

impl DensitySample for f32 {
    #[inline]
    fn from_density(value: f32) -> Self {
        value
    }
}

pub struct TerrainGenerator<L: IslandLayer = GridIslandLayer> {
    seeds: GeneratorSeeds,
    large: L,
    medium: L,
    small: L,
    noise_a: SimplexSource,
    noise_b: SimplexSource,
    kernel: Arc<HeightKernel>,
    biomes: BiomeLookup,
    registry: Arc<BiomeRegistry>,
}

impl<L: IslandLayer> TerrainGenerator<L> {
    /// Build a generator from a master seed.
    ///
    /// `kernel` is normally built once with [`GeneratorOptions::build_kernel`]
    /// and shared by every generator in the process.
    pub fn new(
        seed: u64,
        options: &GeneratorOptions,
        kernel: Arc<HeightKernel>,
        biomes: BiomeLookup,
        registry: Arc<BiomeRegistry>,
    ) -> Result<Self, TerrainError> {
        Self::with_seeds(GeneratorSeeds::from_master(seed), options, kernel, biomes, registry)
    }

    pub fn with_seeds(
        seeds: GeneratorSeeds,
        options: &GeneratorOptions,
        kernel: Arc<HeightKernel>,
        biomes: BiomeLookup,
        registry: Arc<BiomeRegistry>,
    ) -> Result<Self, TerrainError> {
        let layers = [
            L::from_params(seeds.large, &options.large)?,
            L::from_params(seeds.medium, &options.medium)?,
            L::from_params(seeds.small, &options.small)?,
        ];
        Ok(Self::from_layers(seeds, layers, kernel, biomes, registry))
    }

    /// Assemble a generator around already-built layers (large, medium, small).
    pub fn from_layers(
        seeds: GeneratorSeeds,
        layers: [L; 3],
        kernel: Arc<HeightKernel>,
        biomes: BiomeLookup,
        registry: Arc<BiomeRegistry>,
    ) -> Self {
        debug!(
            "terrain generator: {}, {:?}, {} kernel taps",
            seeds,
            biomes,
            kernel.len()
        );
        let [large, medium, small] = layers;
        Self {
            seeds,
            large,
            medium,
            small,
            noise_a: SimplexSource::new(seeds.noise_a),
            noise_b: SimplexSource::new(seeds.noise_b),
            kernel,
            biomes,
            registry,
        }
    }

    pub fn seeds(&self) -> &GeneratorSeeds {
        &self.seeds
    }

    pub fn kernel(&self) -> &HeightKernel {
        &self.kernel
    }

    pub fn biome_lookup(&self) -> &BiomeLookup {
        &self.biomes
    }

    /// The large, medium and small layers
    pub fn layers(&self) -> [&L; 3] {
        [&self.large, &self.medium, &self.small]
    }

    /// Fill `buffer` with densities for the column at world position `(pos_x, pos_z)`.
    ///
    /// Sample `y` sits at height `y * scale_y`; horizontal samples are `scale_xz`
    /// blocks apart. `scale_xz` must be finite and positive, `scale_y` finite and
    /// `buffer` non-empty. On error the buffer is left untouched.
    pub fn fill_density<S: DensitySample>(
        &mut self,
        buffer: &mut [S],
        pos_x: i32,
        pos_z: i32,
        scale_xz: f64,
        scale_y: f64,
        fast: bool,
    ) -> Result<(), TerrainError> {
        check_column_request(buffer.len(), scale_xz, scale_y)?;

        self.large.reset_cache();
        self.medium.reset_cache();
        self.small.reset_cache();

        let (x, z) = grid_column(pos_x, pos_z, scale_xz);
        let (px, pz) = self.warped_position(x, z, scale_xz);

        self.large.refresh_for_column(px, pz);
        self.medium.refresh_for_column(px, pz);
        self.small.refresh_for_column(px, pz);

        let height = self.height_scalar(x, z, fast)?;
        trace!("column ({x}, {z}) -> ({px:.2}, {pz:.2}), height {height:.3}, fast {fast}");

        for (y, slot) in buffer.iter_mut().enumerate() {
            let py = y as f64 * scale_y;
            let mut dist = self.layered_density(px, py, pz, height);
            if !fast && dist > DETAIL_GATE {
                dist = self.add_detail(dist, px, py, pz);
            }
            *slot = S::from_density(dist);
        }
        Ok(())
    }

    /// Double-precision buffer variant of [`fill_density`](Self::fill_density)
    pub fn fill_density_f64(
        &mut self,
        buffer: &mut [f64],
        pos_x: i32,
        pos_z: i32,
        scale_xz: f64,
        scale_y: f64,
        fast: bool,
    ) -> Result<(), TerrainError> {
        self.fill_density(buffer, pos_x, pos_z, scale_xz, scale_y, fast)
    }

    /// Single-precision buffer variant of [`fill_density`](Self::fill_density)
    pub fn fill_density_f32(
        &mut self,
        buffer: &mut [f32],
        pos_x: i32,
        pos_z: i32,
        scale_xz: f64,
        scale_y: f64,
        fast: bool,
    ) -> Result<(), TerrainError> {
        self.fill_density(buffer, pos_x, pos_z, scale_xz, scale_y, fast)
    }

    /// Warped horizontal position of grid column `(x, z)`
    pub fn warped_position(&self, x: i32, z: i32, scale_xz: f64) -> (f64, f64) {
        warp_column(&self.noise_a, &self.noise_b, x, z, scale_xz)
    }

    /// Height scalar for grid column `(x, z)`.
    ///
    /// The biome grid has twice the resolution of the island grid, hence the doubling.
    pub fn height_scalar(&self, x: i32, z: i32, fast: bool) -> Result<f32, TerrainError> {
        if fast {
            return Ok(FAST_HEIGHT);
        }
        Ok(self.average_depth(x << 1, z << 1)? * 0.5)
    }

    /// Kernel-weighted terrain height around biome column `(cx, cz)`.
    ///
    /// Returns 0 without touching the neighbourhood when the centre biome is
    /// flatter than the barren threshold.
    pub fn average_depth(&self, cx: i32, cz: i32) -> Result<f32, TerrainError> {
        if self.terrain_height(cx, cz)? < BARREN_THRESHOLD {
            return Ok(0.0);
        }
        self.kernel
            .weighted_height(cx, cz, |x, z| self.terrain_height(x, z))
    }

    fn terrain_height(&self, x: i32, z: i32) -> Result<f32, TerrainError> {
        self.registry.terrain_height(self.biomes.biome_at(x, z))
    }

    /// Max-combine of the three layers; smaller tiers are skipped once saturated.
    #[inline]
    fn layered_density(&self, px: f64, py: f64, pz: f64, height: f32) -> f32 {
        let mut dist = self.large.density(px, py, pz, height);
        if dist <= SATURATION {
            dist = dist.max(self.medium.density(px, py, pz, height));
        }
        if dist <= SATURATION {
            dist = dist.max(self.small.density(px, py, pz, height));
        }
        dist
    }

    /// Adds three octaves of 3D noise, each biased upward by its own amplitude.
    #[inline]
    fn add_detail(&self, mut dist: f32, px: f64, py: f64, pz: f64) -> f32 {
        for (source, freq, amp) in DETAIL_OCTAVES {
            let noise = match source {
                Detail::A => &self.noise_a,
                Detail::B => &self.noise_b,
            };
            let n = noise.eval3(px * freq, py * freq, pz * freq);
            dist = (dist as f64 + (n * amp + amp)) as f32;
        }
        dist
    }
}

/// Grid column containing world position `(pos_x, pos_z)`
pub fn grid_column(pos_x: i32, pos_z: i32, scale_xz: f64) -> (i32, i32) {
    (
        (pos_x as f64 / scale_xz).floor() as i32,
        (pos_z as f64 / scale_xz).floor() as i32,
    )
}

fn check_column_request(len: usize, scale_xz: f64, scale_y: f64) -> Result<(), TerrainError> {
    if !(scale_xz.is_finite() && scale_xz > 0.0) {
        return Err(TerrainError::InvalidHorizontalScale(scale_xz));
    }
    if !scale_y.is_finite() {
        return Err(TerrainError::InvalidVerticalScale(scale_y));
    }
    if len == 0 {
        return Err(TerrainError::EmptyBuffer);
    }
    Ok(())
}
