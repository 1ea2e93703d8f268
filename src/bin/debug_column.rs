//! Debug script to print one column's densities as text bars in both modes

use std::env;
use std::error::Error;
use std::sync::Arc;

use skyland_density::biome::sky_realm_lookup;
use skyland_density::generator::grid_column;
use skyland_density::{GeneratorOptions, GridIslandLayer, TerrainGenerator};

const SAMPLES: usize = 64;
const SCALE_XZ: f64 = 4.0;
const SCALE_Y: f64 = 4.0;
const BAR_WIDTH: f32 = 20.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Usage: debug_column [seed] [pos_x] [pos_z]
    let args: Vec<String> = env::args().skip(1).collect();
    let seed: u64 = args.first().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let pos_x: i32 = args.get(1).map(|s| s.parse()).transpose()?.unwrap_or(0);
    let pos_z: i32 = args.get(2).map(|s| s.parse()).transpose()?.unwrap_or(0);

    let options = GeneratorOptions::default();
    let (lookup, registry) = sky_realm_lookup(seed, false)?;
    let mut generator = TerrainGenerator::<GridIslandLayer>::new(
        seed,
        &options,
        Arc::new(options.build_kernel()?),
        lookup,
        registry,
    )?;

    let mut fast = [0.0f64; SAMPLES];
    let mut full = [0.0f64; SAMPLES];
    generator.fill_density(&mut fast, pos_x, pos_z, SCALE_XZ, SCALE_Y, true)?;
    generator.fill_density(&mut full, pos_x, pos_z, SCALE_XZ, SCALE_Y, false)?;

    let (x, z) = grid_column(pos_x, pos_z, SCALE_XZ);
    let (px, pz) = generator.warped_position(x, z, SCALE_XZ);
    println!("=== COLUMN ({pos_x}, {pos_z}) seed={seed} ===");
    println!("grid column ({x}, {z}), warped to ({px:.2}, {pz:.2})");
    println!(
        "height scalar: fast {:.3}, full {:.3}",
        generator.height_scalar(x, z, true)?,
        generator.height_scalar(x, z, false)?
    );
    let candidates: Vec<usize> = generator.layers().iter().map(|l| l.candidates().len()).collect();
    println!("island candidates (large/medium/small): {candidates:?}");
    println!();
    println!("   y  |   fast   |   full   |");

    for y in (0..SAMPLES).rev() {
        let bar_len = ((full[y] as f32).clamp(0.0, 1.0) * BAR_WIDTH) as usize;
        println!(
            "{:5.0} | {:8.4} | {:8.4} | {}",
            y as f64 * SCALE_Y,
            fast[y],
            full[y],
            "#".repeat(bar_len)
        );
    }
    Ok(())
}
