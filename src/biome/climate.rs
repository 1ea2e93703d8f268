//! Climate fields and the climate-driven biome source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{BiomeId, BiomeRegistry, NoiseBiomeSource};
use crate::error::TerrainError;
use crate::noise_source::{NoiseSource, SimplexSource};

/// Frequency of the climate fields in biome-grid units
const CLIMATE_FREQUENCY: f64 = 0.004;

/// Climate parameters at one position, each roughly in [-1, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimatePoint {
    pub temperature: f32,
    pub humidity: f32,
}

impl ClimatePoint {
    pub const fn new(temperature: f32, humidity: f32) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    fn distance_sq(&self, other: &ClimatePoint) -> f32 {
        let dt = self.temperature - other.temperature;
        let dh = self.humidity - other.humidity;
        dt * dt + dh * dh
    }
}

/// Seeded temperature and humidity fields
#[derive(Clone, Debug)]
pub struct ClimateSampler {
    temperature: SimplexSource,
    humidity: SimplexSource,
}

impl ClimateSampler {
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(0xC11A7E));
        Self {
            temperature: SimplexSource::new(rng.gen()),
            humidity: SimplexSource::new(rng.gen()),
        }
    }

    /// Sample the climate at a biome-grid position. Height is ignored; the
    /// sky realm has no vertical climate bands.
    pub fn sample(&self, x: i32, _y: i32, z: i32) -> ClimatePoint {
        let fx = x as f64 * CLIMATE_FREQUENCY;
        let fz = z as f64 * CLIMATE_FREQUENCY;
        let temperature = self.temperature.eval2(fx, fz) + self.temperature.eval2(fx * 3.0, fz * 3.0) * 0.25;
        let humidity = self.humidity.eval2(fx, fz) + self.humidity.eval2(fx * 3.0, fz * 3.0) * 0.25;
        ClimatePoint::new(temperature as f32, humidity as f32)
    }
}

/// Picks the biome whose climate target is nearest to the sampled climate.
///
/// Only answers generic noise-biome queries.
#[derive(Clone, Debug)]
pub struct ClimateBiomeSource {
    targets: Vec<(BiomeId, ClimatePoint)>,
}

impl ClimateBiomeSource {
    pub fn new(targets: Vec<(BiomeId, ClimatePoint)>) -> Result<Self, TerrainError> {
        if targets.is_empty() {
            return Err(TerrainError::InvalidBiomeSource(
                "climate biome source needs at least one target".to_string(),
            ));
        }
        Ok(Self { targets })
    }

    /// Climate targets for the sky-realm registry; names missing from the
    /// registry are skipped.
    pub fn sky_realm(registry: &BiomeRegistry) -> Result<Self, TerrainError> {
        let table = [
            ("air_ocean", ClimatePoint::new(0.0, -0.6)),
            ("wind_valley", ClimatePoint::new(-0.5, -0.2)),
            ("stone_garden", ClimatePoint::new(-0.4, 0.4)),
            ("golden_forest", ClimatePoint::new(0.4, 0.1)),
            ("mycotic_forest", ClimatePoint::new(0.2, 0.6)),
            ("sky_meadow", ClimatePoint::new(0.0, 0.2)),
        ];
        let targets = table
            .iter()
            .filter_map(|(name, point)| registry.id_of(name).map(|id| (id, *point)))
            .collect();
        Self::new(targets)
    }

    pub fn select(&self, climate: &ClimatePoint) -> BiomeId {
        let mut best = self.targets[0];
        let mut best_dist = climate.distance_sq(&best.1);
        for &(id, point) in &self.targets[1..] {
            let dist = climate.distance_sq(&point);
            if dist < best_dist {
                best = (id, point);
                best_dist = dist;
            }
        }
        best.0
    }
}

impl NoiseBiomeSource for ClimateBiomeSource {
    fn noise_biome(&self, x: i32, y: i32, z: i32, sampler: &ClimateSampler) -> BiomeId {
        self.select(&sampler.sample(x, y, z))
    }
}
