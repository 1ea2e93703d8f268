//! Island layers: one procedural island population per spatial scale.
//!
//! A layer works in two phases per column. `refresh_for_column` finds the
//! islands that can reach the column (the expensive part) and caches them;
//! `density` is then evaluated once per vertical sample from that cache only.
//! `reset_cache` must run before every new column so candidates never leak
//! from one column into the next.

pub mod grid;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

pub use grid::{CacheStats, GridIslandLayer, Island};

/// Density returned where no island reaches
pub const EMPTY_DENSITY: f32 = -1.0;

/// Contract between the terrain generator and an island population.
pub trait IslandLayer {
    /// Build a layer from its sub-seed and parameters.
    fn from_params(seed: u32, params: &IslandLayerParams) -> Result<Self, TerrainError>
    where
        Self: Sized;

    /// Drop the candidates cached for the previous column.
    fn reset_cache(&mut self);

    /// Cache the islands relevant to the distorted column position `(px, pz)`.
    fn refresh_for_column(&mut self, px: f64, pz: f64);

    /// Density at a 3D position from the cached candidates, in roughly [-1, +inf).
    ///
    /// Values above 1 mean the sample is well inside an island.
    fn density(&self, px: f64, py: f64, pz: f64, height: f32) -> f32;
}

/// Parameters for one island tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IslandLayerParams {
    /// Grid cell size in blocks; at most one island per cell
    pub spacing: f64,
    /// Smallest island radius in blocks
    pub radius_min: f64,
    /// Largest island radius in blocks (plus `falloff`, must not exceed `spacing`)
    pub radius_max: f64,
    /// Placement threshold on [-1, 1] coverage noise (lower = more islands)
    pub coverage: f64,
    /// Mean island centre height
    pub center_y: f64,
    /// Maximum deviation of the centre height from `center_y`
    pub vertical_spread: f64,
    /// Top dome height per unit of column height scalar, as a fraction of the radius
    pub height_variation: f64,
    /// Underside depth as a fraction of the radius
    pub depth_ratio: f64,
    /// Distance in blocks over which density rises from 0 to 1 at a surface
    pub falloff: f64,
}

impl IslandLayerParams {
    /// Big, sparse islands
    pub fn large() -> Self {
        Self {
            spacing: 300.0,
            radius_min: 60.0,
            radius_max: 110.0,
            coverage: -0.2,
            center_y: 128.0,
            vertical_spread: 24.0,
            height_variation: 0.6,
            depth_ratio: 0.7,
            falloff: 12.0,
        }
    }

    pub fn medium() -> Self {
        Self {
            spacing: 150.0,
            radius_min: 25.0,
            radius_max: 55.0,
            coverage: 0.0,
            center_y: 100.0,
            vertical_spread: 40.0,
            height_variation: 0.5,
            depth_ratio: 0.6,
            falloff: 8.0,
        }
    }

    /// Small islets scattered between the larger tiers
    pub fn small() -> Self {
        Self {
            spacing: 60.0,
            radius_min: 8.0,
            radius_max: 20.0,
            coverage: 0.2,
            center_y: 150.0,
            vertical_spread: 60.0,
            height_variation: 0.4,
            depth_ratio: 0.5,
            falloff: 4.0,
        }
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        let positive = [
            ("spacing", self.spacing),
            ("radius_min", self.radius_min),
            ("depth_ratio", self.depth_ratio),
            ("falloff", self.falloff),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TerrainError::InvalidLayer(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        let finite = [
            ("radius_max", self.radius_max),
            ("coverage", self.coverage),
            ("center_y", self.center_y),
            ("vertical_spread", self.vertical_spread),
            ("height_variation", self.height_variation),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(TerrainError::InvalidLayer(format!("{name} must be finite")));
            }
        }
        if self.radius_max < self.radius_min {
            return Err(TerrainError::InvalidLayer(format!(
                "radius range is inverted: {}..{}",
                self.radius_min, self.radius_max
            )));
        }
        // Candidates are only searched in the 3x3 cells around a column
        if self.radius_max + self.falloff > self.spacing {
            return Err(TerrainError::InvalidLayer(format!(
                "radius_max {} plus falloff {} exceeds spacing {}",
                self.radius_max, self.falloff, self.spacing
            )));
        }
        if self.vertical_spread < 0.0 || self.height_variation < 0.0 {
            return Err(TerrainError::InvalidLayer(
                "vertical_spread and height_variation must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IslandLayerParams {
    fn default() -> Self {
        Self::medium()
    }
}
