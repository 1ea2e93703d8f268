//! Error types for density evaluation and option loading.

use thiserror::Error;

use crate::biome::BiomeId;

/// Errors raised while building a generator or filling a density column.
///
/// Precondition violations are reported before any buffer element is written,
/// so a failed fill never leaves partially generated densities behind.
#[derive(Clone, Debug, Error)]
pub enum TerrainError {
    #[error("horizontal sample spacing must be finite and positive, got {0}")]
    InvalidHorizontalScale(f64),
    #[error("vertical sample spacing must be finite, got {0}")]
    InvalidVerticalScale(f64),
    #[error("density buffer is empty")]
    EmptyBuffer,
    #[error("height kernel radius must be positive, got {0}")]
    InvalidKernelRadius(i32),
    #[error("biome {0:?} is not registered")]
    UnknownBiome(BiomeId),
    #[error("invalid island layer parameters: {0}")]
    InvalidLayer(String),
    #[error("invalid biome source: {0}")]
    InvalidBiomeSource(String),
}

/// Errors raised while reading or validating generator options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read options: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed options: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] TerrainError),
}
