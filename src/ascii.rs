//! ASCII rendering for island maps
//!
//! Renders the height grid and land classification as text for quick
//! terminal inspection of a generation pass.

use glam::Vec3;

use crate::config::IslandConfig;
use crate::grid::Grid;

/// Get ASCII character for elevation (11-level gradient).
/// `max_height` is the tallest vertex of the pass; zero renders as water.
pub fn height_char(height: f32, max_height: f32) -> char {
    const CHARS: &[char] = &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A', 'M'];
    if max_height <= 0.0 {
        return CHARS[0];
    }
    let normalized = (height / max_height).clamp(0.0, 1.0);
    let idx = (normalized * (CHARS.len() - 1) as f32) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Render the height grid to an ASCII string.
pub fn render_height_map(heights: &Grid<f32>) -> String {
    let max_height = heights.iter().map(|(_, _, &h)| h).fold(0.0f32, f32::max);
    let mut result = String::with_capacity((heights.width + 1) * heights.height);

    for z in 0..heights.height {
        for x in 0..heights.width {
            result.push(height_char(*heights.get(x, z), max_height));
        }
        result.push('\n');
    }

    result
}

/// Render the land mask to an ASCII string: '#' land, '~' water, 'o' for
/// vertices that survived interior erosion.
pub fn render_land_map(
    mask: &Grid<bool>,
    valid_points: &[Vec3],
    config: &IslandConfig,
) -> String {
    let mut valid = Grid::new_with(mask.width, mask.height, false);
    for p in valid_points {
        let res = config.resolution as f32;
        let x = ((p.x / config.island_size + 0.5) * res).round() as usize;
        let z = ((p.z / config.island_size + 0.5) * res).round() as usize;
        if x < valid.width && z < valid.height {
            valid.set(x, z, true);
        }
    }

    let mut result = String::with_capacity((mask.width + 1) * mask.height);
    for z in 0..mask.height {
        for x in 0..mask.width {
            let ch = if *valid.get(x, z) {
                'o'
            } else if *mask.get(x, z) {
                '#'
            } else {
                '~'
            };
            result.push(ch);
        }
        result.push('\n');
    }

    result
}
