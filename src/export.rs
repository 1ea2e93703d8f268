use image::{ImageBuffer, Rgb, RgbImage};

use crate::slice::DensitySlice;

/// Densities at or beyond this magnitude get the end colours of the ramps
const COLOR_RANGE: f32 = 1.5;

/// Render a density slice with the highest sample at the top of the image.
pub fn render_slice(slice: &DensitySlice) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(slice.width as u32, slice.height as u32);

    for (x, y, density) in slice.iter() {
        let row = slice.height - 1 - y;
        img.put_pixel(x as u32, row as u32, Rgb(density_color(density)));
    }

    img
}

/// Export a density slice as a PNG.
pub fn export_slice_png(slice: &DensitySlice, path: &str) -> Result<(), image::ImageError> {
    render_slice(slice).save(path)
}

/// Diverging colormap centred on the solid/air boundary:
/// sky blues for air, a bright rim at zero, earth tones for solid ground.
fn density_color(density: f32) -> [u8; 3] {
    const AIR: [[f32; 3]; 3] = [
        [0.80, 0.90, 1.00], // Near surface
        [0.45, 0.65, 0.90],
        [0.12, 0.22, 0.45], // Open sky
    ];
    const SOLID: [[f32; 3]; 3] = [
        [0.45, 0.70, 0.30], // Grassy crust
        [0.50, 0.38, 0.25],
        [0.28, 0.24, 0.22], // Deep stone
    ];

    let t = (density.abs() / COLOR_RANGE).clamp(0.0, 1.0);
    let ramp = if density > 0.0 { &SOLID } else { &AIR };

    let scaled = t * 2.0;
    let idx = (scaled as usize).min(1);
    let frac = scaled - idx as f32;
    let (c1, c2) = (ramp[idx], ramp[idx + 1]);

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}
