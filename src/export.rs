//! PNG export for debugging generation passes
//!
//! Renders the height grid, land mask, and placement results to images for
//! visual inspection. This is a debug aid, not a terrain persistence
//! format: nothing here round-trips back into the generator.

use image::{ImageBuffer, Rgb, RgbImage};

use crate::config::IslandConfig;
use crate::grid::Grid;
use crate::placement::PlacementBatch;

/// Export the height grid using a terrain colormap.
/// Heights are normalized against the tallest vertex of the pass.
pub fn export_heightmap(heights: &Grid<f32>, path: &str) -> Result<(), image::ImageError> {
    let max_height = heights.iter().map(|(_, _, &h)| h).fold(0.0f32, f32::max);
    let mut img: RgbImage = ImageBuffer::new(heights.width as u32, heights.height as u32);

    for z in 0..heights.height {
        for x in 0..heights.width {
            let h = *heights.get(x, z);
            let t = if max_height > 0.0 { h / max_height } else { 0.0 };
            img.put_pixel(x as u32, z as u32, Rgb(terrain_colormap(t)));
        }
    }

    img.save(path)
}

/// Terrain colormap: deep water -> shallows -> sand -> grass -> rock -> peak.
fn terrain_colormap(t: f32) -> [u8; 3] {
    let stops: [[f32; 3]; 6] = [
        [0.10, 0.25, 0.55], // deep water
        [0.25, 0.55, 0.80], // shallows
        [0.85, 0.78, 0.55], // sand
        [0.35, 0.60, 0.30], // grass
        [0.50, 0.45, 0.40], // rock
        [0.95, 0.95, 0.95], // peak
    ];

    let t_scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
    let idx = (t_scaled as usize).min(stops.len() - 2);
    let frac = t_scaled - idx as f32;

    let c1 = stops[idx];
    let c2 = stops[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}

/// Export the land mask: green for land, blue for water.
pub fn export_land_mask(mask: &Grid<bool>, path: &str) -> Result<(), image::ImageError> {
    let land_color = Rgb([70u8, 140, 60]);
    let water_color = Rgb([40u8, 80, 150]);
    let mut img: RgbImage = ImageBuffer::new(mask.width as u32, mask.height as u32);

    for z in 0..mask.height {
        for x in 0..mask.width {
            let color = if *mask.get(x, z) { land_color } else { water_color };
            img.put_pixel(x as u32, z as u32, color);
        }
    }

    img.save(path)
}

/// Export the height grid with placement batches overlaid as colored dots.
/// Each batch gets its own marker color, cycling through a small palette.
pub fn export_placements(
    heights: &Grid<f32>,
    batches: &[&PlacementBatch],
    config: &IslandConfig,
    path: &str,
) -> Result<(), image::ImageError> {
    let max_height = heights.iter().map(|(_, _, &h)| h).fold(0.0f32, f32::max);
    let mut img: RgbImage = ImageBuffer::new(heights.width as u32, heights.height as u32);

    for z in 0..heights.height {
        for x in 0..heights.width {
            let h = *heights.get(x, z);
            let t = if max_height > 0.0 { h / max_height } else { 0.0 };
            img.put_pixel(x as u32, z as u32, Rgb(terrain_colormap(t)));
        }
    }

    const MARKERS: &[[u8; 3]] = &[[230, 40, 40], [240, 220, 40], [230, 40, 230], [40, 230, 230]];
    let res = config.resolution as f32;

    for (bi, batch) in batches.iter().enumerate() {
        let marker = Rgb(MARKERS[bi % MARKERS.len()]);
        for inst in &batch.instances {
            let x = ((inst.position.x / config.island_size + 0.5) * res).round() as i64;
            let z = ((inst.position.z / config.island_size + 0.5) * res).round() as i64;
            if x >= 0 && z >= 0 && (x as usize) < heights.width && (z as usize) < heights.height {
                img.put_pixel(x as u32, z as u32, marker);
            }
        }
    }

    img.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_colormap_endpoints() {
        // Low end is water-blue, high end is near-white.
        let low = terrain_colormap(0.0);
        let high = terrain_colormap(1.0);
        assert!(low[2] > low[0], "low end should be blue-dominant: {:?}", low);
        assert!(high.iter().all(|&c| c > 230), "high end should be bright: {:?}", high);
    }

    #[test]
    fn test_terrain_colormap_is_clamped() {
        assert_eq!(terrain_colormap(-0.5), terrain_colormap(0.0));
        assert_eq!(terrain_colormap(1.5), terrain_colormap(1.0));
    }
}
