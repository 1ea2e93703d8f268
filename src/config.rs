//! Generator options: island tier parameters and kernel size.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, TerrainError};
use crate::height_kernel::{HeightKernel, STANDARD_RADIUS};
use crate::island::IslandLayerParams;

/// Everything needed to parameterise a terrain generator besides its seed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    pub large: IslandLayerParams,
    pub medium: IslandLayerParams,
    pub small: IslandLayerParams,
    /// Height kernel radius in biome-grid units
    pub kernel_radius: i32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            large: IslandLayerParams::large(),
            medium: IslandLayerParams::medium(),
            small: IslandLayerParams::small(),
            kernel_radius: STANDARD_RADIUS,
        }
    }
}

impl GeneratorOptions {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load and validate options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TerrainError> {
        self.large.validate()?;
        self.medium.validate()?;
        self.small.validate()?;
        if self.kernel_radius <= 0 {
            return Err(TerrainError::InvalidKernelRadius(self.kernel_radius));
        }
        Ok(())
    }

    /// Build the height kernel described by these options
    pub fn build_kernel(&self) -> Result<HeightKernel, TerrainError> {
        HeightKernel::build(self.kernel_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_validate() {
        GeneratorOptions::default().validate().unwrap();
    }

    #[test]
    fn test_missing_fields_fall_back_to_presets() {
        let options = GeneratorOptions::from_json_str(r#"{"kernel_radius": 4}"#).unwrap();
        assert_eq!(options.kernel_radius, 4);
        assert_eq!(options.large, IslandLayerParams::large());
        assert_eq!(options.small, IslandLayerParams::small());
    }

    #[test]
    fn test_pretty_json_reloads() {
        let options = GeneratorOptions::default();
        let json = options.to_json_pretty().unwrap();
        assert_eq!(GeneratorOptions::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_invalid_layer_is_rejected() {
        let json = r#"{"medium": {"spacing": 10.0, "radius_min": 5.0, "radius_max": 50.0,
            "coverage": 0.0, "center_y": 64.0, "vertical_spread": 0.0,
            "height_variation": 0.5, "depth_ratio": 0.5, "falloff": 4.0}}"#;
        assert!(matches!(
            GeneratorOptions::from_json_str(json),
            Err(ConfigError::Invalid(TerrainError::InvalidLayer(_)))
        ));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        assert!(matches!(
            GeneratorOptions::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            GeneratorOptions::load("/nonexistent/skyland/options.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_build_kernel_uses_radius() {
        let options = GeneratorOptions {
            kernel_radius: 2,
            ..GeneratorOptions::default()
        };
        assert_eq!(options.build_kernel().unwrap().radius(), 2);
    }
}
