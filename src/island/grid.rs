//! Jittered-grid island layer.
//!
//! The plane is divided into square cells of `spacing` blocks. Each cell holds
//! at most one island, placed at a seeded random point inside the cell and kept
//! only where a low-frequency coverage noise exceeds the layer's threshold.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{IslandLayer, IslandLayerParams, EMPTY_DENSITY};
use crate::error::TerrainError;
use crate::noise_source::{NoiseSource, SimplexSource};
use crate::seeds::cell_seed;

/// Placement memo entries kept across columns before `reset_cache` trims it
const PLACEMENT_MEMO_LIMIT: usize = 128;

/// Coverage noise frequency in cells
const COVERAGE_FREQUENCY: f64 = 0.25;

/// Minimum top dome height as a fraction of the radius, so flat columns keep a crust
const MIN_TOP_RATIO: f64 = 0.05;

/// One placed island
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Island {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub radius: f64,
}

/// Cache counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls to `refresh_for_column`
    pub refreshes: usize,
    /// Cell placements computed from scratch
    pub placements_computed: usize,
    /// Cell placements served from the memo
    pub placements_reused: usize,
}

#[derive(Clone, Debug)]
pub struct GridIslandLayer {
    seed: u32,
    params: IslandLayerParams,
    coverage: SimplexSource,
    /// Islands that can reach the current column
    candidates: Vec<Island>,
    /// Cell placements; deterministic, so never stale
    placements: HashMap<(i32, i32), Option<Island>>,
    stats: CacheStats,
}

impl GridIslandLayer {
    pub fn new(seed: u32, params: IslandLayerParams) -> Result<Self, TerrainError> {
        params.validate()?;
        Ok(Self {
            seed,
            params,
            coverage: SimplexSource::new(seed),
            candidates: Vec::with_capacity(9),
            placements: HashMap::with_capacity(PLACEMENT_MEMO_LIMIT),
            stats: CacheStats::default(),
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn params(&self) -> &IslandLayerParams {
        &self.params
    }

    pub fn candidates(&self) -> &[Island] {
        &self.candidates
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The island placed in a cell, if the cell has one.
    pub fn island_in_cell(&self, cell_x: i32, cell_z: i32) -> Option<Island> {
        let p = &self.params;
        let mut rng = ChaCha8Rng::seed_from_u64(cell_seed(self.seed as u64, cell_x, cell_z));
        let x = (cell_x as f64 + rng.gen::<f64>()) * p.spacing;
        let z = (cell_z as f64 + rng.gen::<f64>()) * p.spacing;
        let radius = rng.gen_range(p.radius_min..=p.radius_max);
        let y = p.center_y + rng.gen_range(-1.0..=1.0) * p.vertical_spread;

        let coverage = self.coverage.eval2(
            x / p.spacing * COVERAGE_FREQUENCY,
            z / p.spacing * COVERAGE_FREQUENCY,
        );
        (coverage > p.coverage).then_some(Island { x, y, z, radius })
    }

    fn placement(&mut self, cell_x: i32, cell_z: i32) -> Option<Island> {
        if let Some(&island) = self.placements.get(&(cell_x, cell_z)) {
            self.stats.placements_reused += 1;
            return island;
        }
        let island = self.island_in_cell(cell_x, cell_z);
        self.placements.insert((cell_x, cell_z), island);
        self.stats.placements_computed += 1;
        island
    }

    /// Density contributed by a single island
    fn island_density(&self, island: &Island, px: f64, py: f64, pz: f64, height: f32) -> f32 {
        let p = &self.params;
        let dx = px - island.x;
        let dz = pz - island.z;
        let dist = (dx * dx + dz * dz).sqrt();

        let rim = (island.radius - dist) / p.falloff;

        let d = (dist / island.radius).min(1.0);
        let dome = 1.0 - d * d;
        let top_ratio = MIN_TOP_RATIO + p.height_variation * height as f64;
        let top = island.y + island.radius * top_ratio * dome;
        let bottom = island.y - island.radius * p.depth_ratio * dome.sqrt();
        let vertical = (top - py).min(py - bottom) / p.falloff;

        rim.min(vertical) as f32
    }
}

impl IslandLayer for GridIslandLayer {
    fn from_params(seed: u32, params: &IslandLayerParams) -> Result<Self, TerrainError> {
        Self::new(seed, params.clone())
    }

    fn reset_cache(&mut self) {
        self.candidates.clear();
        if self.placements.len() > PLACEMENT_MEMO_LIMIT {
            self.placements.clear();
        }
    }

    fn refresh_for_column(&mut self, px: f64, pz: f64) {
        self.stats.refreshes += 1;
        self.candidates.clear();

        // Far-off positions saturate the cell index; neighbours wrap and get pruned by reach
        let cell_x = (px / self.params.spacing).floor() as i32;
        let cell_z = (pz / self.params.spacing).floor() as i32;
        for ox in -1..=1 {
            for oz in -1..=1 {
                let (cx, cz) = (cell_x.wrapping_add(ox), cell_z.wrapping_add(oz));
                let Some(island) = self.placement(cx, cz) else {
                    continue;
                };
                // Past radius + falloff the rim term is already below -1
                let reach = island.radius + self.params.falloff;
                let dx = px - island.x;
                let dz = pz - island.z;
                if dx * dx + dz * dz < reach * reach {
                    self.candidates.push(island);
                }
            }
        }
    }

    fn density(&self, px: f64, py: f64, pz: f64, height: f32) -> f32 {
        self.candidates
            .iter()
            .map(|island| self.island_density(island, px, py, pz, height))
            .fold(EMPTY_DENSITY, f32::max)
    }
}
