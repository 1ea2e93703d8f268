//! Cell-based land-biome map with a direct column lookup.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{BiomeId, ClimateSampler, LandBiomeSource, NoiseBiomeSource};
use crate::error::TerrainError;
use crate::seeds::cell_seed;

/// Voronoi-style biome map: every cell of `cell_size` biome columns holds one
/// jittered site, and a column takes the biome of its nearest site.
#[derive(Clone, Debug)]
pub struct LandBiomeMap {
    seed: u64,
    cell_size: i32,
    biomes: Vec<BiomeId>,
}

impl LandBiomeMap {
    pub fn new(seed: u64, cell_size: i32, biomes: Vec<BiomeId>) -> Result<Self, TerrainError> {
        if cell_size <= 0 {
            return Err(TerrainError::InvalidBiomeSource(format!(
                "land cell size must be positive, got {cell_size}"
            )));
        }
        if biomes.is_empty() {
            return Err(TerrainError::InvalidBiomeSource(
                "land biome map needs at least one biome".to_string(),
            ));
        }
        Ok(Self {
            seed,
            cell_size,
            biomes,
        })
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Site position and biome for a cell
    fn site(&self, cell_x: i32, cell_z: i32) -> (f64, f64, BiomeId) {
        let mut rng = ChaCha8Rng::seed_from_u64(cell_seed(self.seed, cell_x, cell_z));
        let size = self.cell_size as f64;
        let sx = (cell_x as f64 + rng.gen::<f64>()) * size;
        let sz = (cell_z as f64 + rng.gen::<f64>()) * size;
        let biome = self.biomes[rng.gen_range(0..self.biomes.len())];
        (sx, sz, biome)
    }

    fn nearest(&self, x: i32, z: i32) -> BiomeId {
        let cell_x = x.div_euclid(self.cell_size);
        let cell_z = z.div_euclid(self.cell_size);
        let (px, pz) = (x as f64 + 0.5, z as f64 + 0.5);

        let mut best = self.biomes[0];
        let mut best_dist = f64::MAX;
        for ox in -1..=1 {
            for oz in -1..=1 {
                let (cx, cz) = (cell_x.wrapping_add(ox), cell_z.wrapping_add(oz));
                let (sx, sz, biome) = self.site(cx, cz);
                let dist = (sx - px).powi(2) + (sz - pz).powi(2);
                if dist < best_dist {
                    best_dist = dist;
                    best = biome;
                }
            }
        }
        best
    }
}

impl LandBiomeSource for LandBiomeMap {
    fn land_biome(&self, x: i32, z: i32) -> BiomeId {
        self.nearest(x, z)
    }
}

impl NoiseBiomeSource for LandBiomeMap {
    fn noise_biome(&self, x: i32, _y: i32, z: i32, _sampler: &ClimateSampler) -> BiomeId {
        self.nearest(x, z)
    }

    fn into_land_source(self: Arc<Self>) -> Option<Arc<dyn LandBiomeSource>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::BiomeLookup;

    #[test]
    fn test_lookup_is_deterministic() {
        let map = LandBiomeMap::new(5, 16, vec![BiomeId(0), BiomeId(1), BiomeId(2)]).unwrap();
        let again = LandBiomeMap::new(5, 16, vec![BiomeId(0), BiomeId(1), BiomeId(2)]).unwrap();
        for x in -40..40 {
            assert_eq!(map.land_biome(x, x * 3), again.land_biome(x, x * 3));
        }
    }

    #[test]
    fn test_both_paths_agree() {
        let map = LandBiomeMap::new(11, 8, vec![BiomeId(0), BiomeId(3)]).unwrap();
        let sampler = ClimateSampler::new(0);
        for x in -20..20 {
            assert_eq!(map.land_biome(x, -x), map.noise_biome(x, 0, -x, &sampler));
        }
    }

    #[test]
    fn test_resolves_to_direct_lookup() {
        let map = Arc::new(LandBiomeMap::new(1, 8, vec![BiomeId(0)]).unwrap());
        let lookup = BiomeLookup::resolve(map, Arc::new(ClimateSampler::new(1)));
        assert!(lookup.is_direct());
    }

    #[test]
    fn test_invalid_construction_is_an_error() {
        assert!(matches!(
            LandBiomeMap::new(1, 0, vec![BiomeId(0)]),
            Err(TerrainError::InvalidBiomeSource(_))
        ));
        assert!(matches!(
            LandBiomeMap::new(1, 8, Vec::new()),
            Err(TerrainError::InvalidBiomeSource(_))
        ));
    }

    #[test]
    fn test_lookup_near_i32_bounds() {
        let map = LandBiomeMap::new(3, 1, vec![BiomeId(0), BiomeId(1)]).unwrap();
        for (x, z) in [(i32::MAX, i32::MIN), (i32::MIN, i32::MAX)] {
            assert!([BiomeId(0), BiomeId(1)].contains(&map.land_biome(x, z)));
        }
    }
}
