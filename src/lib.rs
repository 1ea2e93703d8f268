//! Floating-island density field generation
//!
//! Re-exports modules for use by binaries and tools.

pub mod biome;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod height_kernel;
pub mod island;
pub mod noise_source;
pub mod seeds;
pub mod slice;
pub mod warp;

pub use config::GeneratorOptions;
pub use error::{ConfigError, TerrainError};
pub use generator::{DensitySample, TerrainGenerator, FAST_HEIGHT};
pub use height_kernel::HeightKernel;
pub use island::{GridIslandLayer, IslandLayer, IslandLayerParams};
pub use seeds::GeneratorSeeds;
