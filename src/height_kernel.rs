//! Radial weighting table for the per-column height scalar.
//!
//! The table is built once during setup and shared read-only between generator
//! instances. Each tap weights a neighbouring biome column by its normalised
//! distance from the centre, so the result leans on the ring around a column
//! rather than the column itself.

use crate::error::TerrainError;

/// Radius of the standard kernel, in doubled-column (biome grid) units
pub const STANDARD_RADIUS: i32 = 3;

/// One neighbour offset and its normalised weight
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelTap {
    pub dx: i32,
    pub dz: i32,
    pub weight: f32,
}

/// Immutable disc kernel whose weights sum to 1
#[derive(Clone, Debug)]
pub struct HeightKernel {
    radius: i32,
    taps: Vec<KernelTap>,
}

impl HeightKernel {
    /// Build the kernel for a disc of the given radius.
    ///
    /// Offsets are visited row by row over `[-radius, radius]²` and kept when
    /// their normalised distance is at most 1.
    pub fn build(radius: i32) -> Result<Self, TerrainError> {
        if radius <= 0 {
            return Err(TerrainError::InvalidKernelRadius(radius));
        }

        let mut raw = Vec::new();
        let mut sum = 0.0f32;
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                let dist = ((dx * dx + dz * dz) as f32).sqrt() / radius as f32;
                if dist <= 1.0 {
                    sum += dist;
                    raw.push((dx, dz, dist));
                }
            }
        }

        let taps = raw
            .into_iter()
            .map(|(dx, dz, dist)| KernelTap {
                dx,
                dz,
                weight: dist / sum,
            })
            .collect();

        Ok(Self { radius, taps })
    }

    /// The radius-3 kernel used by the terrain generator
    pub fn standard() -> Self {
        Self::build(STANDARD_RADIUS).expect("standard kernel radius is positive")
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn taps(&self) -> &[KernelTap] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Weighted sum of `height_at` over every tap around `(x, z)`.
    ///
    /// Neighbour coordinates wrap at the `i32` bounds. Stops at the first
    /// lookup error and returns it unchanged.
    pub fn weighted_height<F>(&self, x: i32, z: i32, mut height_at: F) -> Result<f32, TerrainError>
    where
        F: FnMut(i32, i32) -> Result<f32, TerrainError>,
    {
        let mut total = 0.0f32;
        for tap in &self.taps {
            total += height_at(x.wrapping_add(tap.dx), z.wrapping_add(tap.dz))? * tap.weight;
        }
        Ok(total)
    }
}

impl Default for HeightKernel {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_at(kernel: &HeightKernel, dx: i32, dz: i32) -> Option<f32> {
        kernel
            .taps()
            .iter()
            .find(|t| t.dx == dx && t.dz == dz)
            .map(|t| t.weight)
    }

    #[test]
    fn test_standard_kernel_shape() {
        let kernel = HeightKernel::standard();

        // 7 + 2*5 + 2*5 + 2 offsets fall inside the radius-3 disc
        assert_eq!(kernel.len(), 29);
        assert_eq!(weight_at(&kernel, 0, 0), Some(0.0));
        assert!(weight_at(&kernel, 3, 0).is_some());
        assert!(weight_at(&kernel, 2, 2).is_some());
        assert!(weight_at(&kernel, 1, 3).is_none());
        assert!(weight_at(&kernel, 3, 3).is_none());
    }

    #[test]
    fn test_weights_sum_to_one() {
        for radius in 1..=6 {
            let kernel = HeightKernel::build(radius).unwrap();
            let sum: f64 = kernel.taps().iter().map(|t| t.weight as f64).sum();
            assert!((sum - 1.0).abs() < 1e-5, "radius {radius}: sum {sum}");
        }
    }

    #[test]
    fn test_weights_normalised_in_single_precision() {
        let kernel = HeightKernel::standard();
        let dists: Vec<f32> = kernel
            .taps()
            .iter()
            .map(|t| ((t.dx * t.dx + t.dz * t.dz) as f32).sqrt() / 3.0)
            .collect();
        let sum = dists.iter().fold(0.0f32, |acc, d| acc + d);
        for (tap, dist) in kernel.taps().iter().zip(dists) {
            assert_eq!(tap.weight.to_bits(), (dist / sum).to_bits());
        }
    }

    #[test]
    fn test_neighbours_wrap_at_i32_bounds() {
        let kernel = HeightKernel::standard();
        let mut visited = Vec::new();
        let h = kernel
            .weighted_height(i32::MAX - 1, i32::MIN + 1, |x, z| {
                visited.push((x, z));
                Ok(0.5)
            })
            .unwrap();
        assert!((h - 0.5).abs() < 1e-5);
        assert!(visited.contains(&(i32::MIN + 1, i32::MIN + 1)));
        assert!(visited.contains(&(i32::MAX - 1, i32::MAX - 1)));
    }

    #[test]
    fn test_offsets_are_rotation_and_reflection_symmetric() {
        let kernel = HeightKernel::standard();
        for tap in kernel.taps() {
            let images = [
                (-tap.dz, tap.dx),
                (-tap.dx, -tap.dz),
                (tap.dz, -tap.dx),
                (-tap.dx, tap.dz),
                (tap.dx, -tap.dz),
            ];
            for (dx, dz) in images {
                assert_eq!(weight_at(&kernel, dx, dz), Some(tap.weight), "({dx},{dz})");
            }
        }
    }

    #[test]
    fn test_weighted_height_invariant_under_field_rotation() {
        let kernel = HeightKernel::standard();
        // Arbitrary, non-symmetric field around the origin
        let field = |x: i32, z: i32| ((x * 7 + z * 3).rem_euclid(11)) as f32 * 0.1;

        let base = kernel.weighted_height(0, 0, |x, z| Ok(field(x, z))).unwrap();
        let rot90 = kernel.weighted_height(0, 0, |x, z| Ok(field(-z, x))).unwrap();
        let rot180 = kernel.weighted_height(0, 0, |x, z| Ok(field(-x, -z))).unwrap();
        let mirrored = kernel.weighted_height(0, 0, |x, z| Ok(field(-x, z))).unwrap();

        assert!((base - rot90).abs() < 1e-5);
        assert!((base - rot180).abs() < 1e-5);
        assert!((base - mirrored).abs() < 1e-5);
    }

    #[test]
    fn test_constant_field_returns_constant() {
        let kernel = HeightKernel::standard();
        let h = kernel.weighted_height(10, -4, |_, _| Ok(0.8)).unwrap();
        assert!((h - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_lookup_error_propagates() {
        let kernel = HeightKernel::standard();
        let result = kernel.weighted_height(0, 0, |x, _| {
            if x == 2 {
                Err(TerrainError::UnknownBiome(crate::biome::BiomeId(9)))
            } else {
                Ok(1.0)
            }
        });
        assert!(matches!(result, Err(TerrainError::UnknownBiome(_))));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        assert!(matches!(
            HeightKernel::build(0),
            Err(TerrainError::InvalidKernelRadius(0))
        ));
    }
}
