//! Vertical density slices sampled in parallel.
//!
//! A slice is a row of columns along X at a fixed Z. Columns are spread over
//! rayon's worker threads, and every worker builds its own generator through
//! `map_init`; island caches are never shared between threads.

use log::debug;
use rayon::prelude::*;

use crate::error::TerrainError;
use crate::generator::TerrainGenerator;
use crate::island::IslandLayer;

/// Column-major grid of densities: `width` columns by `height` vertical samples.
#[derive(Clone, Debug)]
pub struct DensitySlice {
    pub width: usize,
    pub height: usize,
    data: Vec<f32>,
}

impl DensitySlice {
    pub fn new_with(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "slice index out of bounds");
        x * self.height + y
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Densities of column `x`, bottom sample first
    pub fn column(&self, x: usize) -> &[f32] {
        let start = x * self.height;
        &self.data[start..start + self.height]
    }

    /// Iterate over all samples with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let height = self.height;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &val)| (idx / height, idx % height, val))
    }

    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Fraction of samples with positive density
    pub fn solid_fraction(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let solid = self.data.iter().filter(|&&v| v > 0.0).count();
        solid as f64 / self.data.len() as f64
    }
}

/// Which columns to sample and how
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceRequest {
    /// World X of the first column
    pub origin_x: i32,
    /// World Z shared by every column
    pub origin_z: i32,
    /// Number of columns
    pub columns: usize,
    /// Vertical samples per column
    pub samples: usize,
    pub scale_xz: f64,
    pub scale_y: f64,
    pub fast: bool,
}

impl SliceRequest {
    /// World X of column `i`
    pub fn column_x(&self, i: usize) -> i32 {
        self.origin_x + (i as f64 * self.scale_xz).floor() as i32
    }
}

/// Sample a slice, building one generator per rayon worker with `make_generator`.
pub fn sample_slice<L, F>(request: &SliceRequest, make_generator: F) -> Result<DensitySlice, TerrainError>
where
    L: IslandLayer,
    F: Fn() -> Result<TerrainGenerator<L>, TerrainError> + Send + Sync,
{
    debug!(
        "sampling slice: {} columns x {} samples from ({}, {}), fast {}",
        request.columns, request.samples, request.origin_x, request.origin_z, request.fast
    );

    let columns: Vec<Vec<f32>> = (0..request.columns)
        .into_par_iter()
        .map_init(&make_generator, |generator, i| -> Result<Vec<f32>, TerrainError> {
            let generator = generator.as_mut().map_err(|e| e.clone())?;
            let mut buffer = vec![0.0f32; request.samples];
            generator.fill_density(
                &mut buffer,
                request.column_x(i),
                request.origin_z,
                request.scale_xz,
                request.scale_y,
                request.fast,
            )?;
            Ok(buffer)
        })
        .collect::<Result<_, TerrainError>>()?;

    let mut slice = DensitySlice::new_with(request.columns, request.samples, 0.0);
    for (x, column) in columns.into_iter().enumerate() {
        for (y, value) in column.into_iter().enumerate() {
            slice.set(x, y, value);
        }
    }
    Ok(slice)
}
