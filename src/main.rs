use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use log::info;

use skyland_density::biome::sky_realm_lookup;
use skyland_density::export::export_slice_png;
use skyland_density::slice::{sample_slice, SliceRequest};
use skyland_density::{GeneratorOptions, GeneratorSeeds, GridIslandLayer, TerrainGenerator};

#[derive(Parser, Debug)]
#[command(name = "skyland_density")]
#[command(about = "Sample floating-island density slices and export them as PNG")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generator options JSON (island layers, kernel radius); defaults if omitted
    #[arg(short, long)]
    options: Option<String>,

    /// World X of the first column
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_x: i32,

    /// World Z of the slice
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    origin_z: i32,

    /// Number of columns in the slice
    #[arg(short = 'W', long, default_value = "512")]
    width: usize,

    /// Vertical samples per column
    #[arg(short = 'n', long, default_value = "64")]
    samples: usize,

    /// Horizontal distance between columns in blocks
    #[arg(long, default_value = "4")]
    scale_xz: f64,

    /// Vertical distance between samples in blocks
    #[arg(long, default_value = "4")]
    scale_y: f64,

    /// Skip the biome height kernel and fine detail noise
    #[arg(long)]
    fast: bool,

    /// Use the direct land-biome map instead of climate-driven biomes
    #[arg(long)]
    land_biomes: bool,

    /// Output PNG path
    #[arg(long, default_value = "density_slice.png")]
    output: String,

    /// Print the effective options as JSON and exit
    #[arg(long)]
    dump_options: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let options = match &args.options {
        Some(path) => GeneratorOptions::load(path)?,
        None => GeneratorOptions::default(),
    };
    if args.dump_options {
        println!("{}", options.to_json_pretty()?);
        return Ok(());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating density slice with seed: {}", seed);
    info!("{}", GeneratorSeeds::from_master(seed));

    let kernel = Arc::new(options.build_kernel()?);
    let (lookup, registry) = sky_realm_lookup(seed, args.land_biomes)?;
    info!(
        "Biome path: {}",
        if lookup.is_direct() { "direct land lookup" } else { "climate sampler" }
    );

    let request = SliceRequest {
        origin_x: args.origin_x,
        origin_z: args.origin_z,
        columns: args.width,
        samples: args.samples,
        scale_xz: args.scale_xz,
        scale_y: args.scale_y,
        fast: args.fast,
    };
    info!(
        "Sampling {} columns x {} samples at ({}, {})...",
        request.columns, request.samples, request.origin_x, request.origin_z
    );

    // One generator per worker thread; kernel, lookup and registry are shared
    let slice = sample_slice(&request, || {
        TerrainGenerator::<GridIslandLayer>::new(
            seed,
            &options,
            Arc::clone(&kernel),
            lookup.clone(),
            Arc::clone(&registry),
        )
    })?;

    let (min_d, max_d) = slice.min_max();
    info!(
        "Density range: {:.3} to {:.3} ({:.1}% solid)",
        min_d,
        max_d,
        slice.solid_fraction() * 100.0
    );

    export_slice_png(&slice, &args.output)?;
    info!("Wrote {}", args.output);
    Ok(())
}
