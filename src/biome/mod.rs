//! Biome height lookup consumed by the terrain generator.
//!
//! Two kinds of biome source exist. Every source answers generic noise-biome
//! queries driven by a [`ClimateSampler`]; some sources can also answer direct
//! land-biome queries by column. [`BiomeLookup::resolve`] checks for the direct
//! capability once and the generator then uses whichever path was chosen.
//! Both paths end in the same [`BiomeRegistry`] for terrain heights.

pub mod climate;
pub mod land;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

pub use climate::{ClimateBiomeSource, ClimatePoint, ClimateSampler};
pub use land::LandBiomeMap;

/// Index of a biome inside a [`BiomeRegistry`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BiomeId(pub u16);

/// A registered biome and the terrain-height weight it contributes to islands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    /// 0 = no islands, 1 = full-height islands
    pub terrain_height: f32,
}

impl Biome {
    pub fn new(name: impl Into<String>, terrain_height: f32) -> Self {
        Self {
            name: name.into(),
            terrain_height,
        }
    }
}

/// Ordered biome table; a biome's id is its position in the table
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BiomeRegistry {
    biomes: Vec<Biome>,
    #[serde(skip)]
    by_name: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a biome and return its id. Re-registering a name replaces the entry.
    pub fn register(&mut self, biome: Biome) -> BiomeId {
        if let Some(&id) = self.by_name.get(&biome.name) {
            self.biomes[id.0 as usize] = biome;
            return id;
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.by_name.insert(biome.name.clone(), id);
        self.biomes.push(biome);
        id
    }

    pub fn get(&self, id: BiomeId) -> Option<&Biome> {
        self.biomes.get(id.0 as usize)
    }

    pub fn id_of(&self, name: &str) -> Option<BiomeId> {
        self.by_name.get(name).copied()
    }

    pub fn terrain_height(&self, id: BiomeId) -> Result<f32, TerrainError> {
        self.get(id)
            .map(|b| b.terrain_height)
            .ok_or(TerrainError::UnknownBiome(id))
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BiomeId, &Biome)> {
        self.biomes
            .iter()
            .enumerate()
            .map(|(i, b)| (BiomeId(i as u16), b))
    }

    /// Rebuild the name index after deserialisation
    pub fn reindex(&mut self) {
        self.by_name = self
            .biomes
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), BiomeId(i as u16)))
            .collect();
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let mut registry: Self = serde_json::from_str(json)?;
        registry.reindex();
        Ok(registry)
    }

    /// The sky-realm biome set used by the command-line tools
    pub fn sky_realm() -> Self {
        let mut registry = Self::new();
        registry.register(Biome::new("air_ocean", 0.0));
        registry.register(Biome::new("wind_valley", 0.05));
        registry.register(Biome::new("stone_garden", 0.6));
        registry.register(Biome::new("golden_forest", 0.8));
        registry.register(Biome::new("mycotic_forest", 0.9));
        registry.register(Biome::new("sky_meadow", 1.0));
        registry
    }
}

/// Biome source queried through a climate sampler (the generic path)
pub trait NoiseBiomeSource: Send + Sync {
    fn noise_biome(&self, x: i32, y: i32, z: i32, sampler: &ClimateSampler) -> BiomeId;

    /// Expose a direct land-biome lookup if this source has one.
    fn into_land_source(self: Arc<Self>) -> Option<Arc<dyn LandBiomeSource>> {
        None
    }
}

/// Direct land-biome lookup by column
pub trait LandBiomeSource: Send + Sync {
    fn land_biome(&self, x: i32, z: i32) -> BiomeId;
}

/// Biome access path, chosen once when a generator is built
#[derive(Clone)]
pub enum BiomeLookup {
    Land(Arc<dyn LandBiomeSource>),
    Noise {
        source: Arc<dyn NoiseBiomeSource>,
        sampler: Arc<ClimateSampler>,
    },
}

impl BiomeLookup {
    /// Prefer the direct land lookup when `source` offers it.
    pub fn resolve(source: Arc<dyn NoiseBiomeSource>, sampler: Arc<ClimateSampler>) -> Self {
        match Arc::clone(&source).into_land_source() {
            Some(land) => BiomeLookup::Land(land),
            None => BiomeLookup::Noise { source, sampler },
        }
    }

    #[inline]
    pub fn biome_at(&self, x: i32, z: i32) -> BiomeId {
        match self {
            BiomeLookup::Land(land) => land.land_biome(x, z),
            BiomeLookup::Noise { source, sampler } => source.noise_biome(x, 0, z, sampler),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, BiomeLookup::Land(_))
    }
}

impl std::fmt::Debug for BiomeLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BiomeLookup::Land(_) => f.write_str("BiomeLookup::Land"),
            BiomeLookup::Noise { .. } => f.write_str("BiomeLookup::Noise"),
        }
    }
}

/// Sky-realm registry plus a resolved lookup over it.
///
/// With `land` set the lookup goes through a [`LandBiomeMap`] (direct path);
/// otherwise through a [`ClimateBiomeSource`] (generic sampler path).
pub fn sky_realm_lookup(
    seed: u64,
    land: bool,
) -> Result<(BiomeLookup, Arc<BiomeRegistry>), TerrainError> {
    let registry = BiomeRegistry::sky_realm();
    let sampler = Arc::new(ClimateSampler::new(seed));
    let source: Arc<dyn NoiseBiomeSource> = if land {
        let ids = registry.iter().map(|(id, _)| id).collect();
        Arc::new(LandBiomeMap::new(seed, 48, ids)?)
    } else {
        Arc::new(ClimateBiomeSource::sky_realm(&registry)?)
    };
    Ok((BiomeLookup::resolve(source, sampler), Arc::new(registry)))
}
