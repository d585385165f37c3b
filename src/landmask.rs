//! Land classification and interior-point erosion
//!
//! Derives the buildable-land mask from the height grid, then erodes it to
//! find "safe interior" points: vertices whose entire neighborhood is land.
//! Placement only ever draws from these, so nothing lands on the literal
//! coastline.

use glam::Vec3;

use crate::config::IslandConfig;
use crate::grid::Grid;

/// Classify every grid vertex as land or water.
///
/// A vertex is land iff its height clears the land threshold AND its radial
/// distance from the origin stays inside `island_size/2 - edge_margin`.
/// The radial margin is independent of the irregular cluster edge; it keeps
/// thin slivers at the outer mesh boundary out of the mask.
pub fn extract_land_mask(heights: &Grid<f32>, config: &IslandConfig) -> Grid<bool> {
    let mut mask = Grid::new_with(heights.width, heights.height, false);
    let max_radius = config.half_size() - config.edge_margin;

    for z in 0..heights.height {
        for x in 0..heights.width {
            let h = *heights.get(x, z);
            let p = config.vertex_world(x, z);
            let land = h > config.land_height_threshold && p.length() < max_radius;
            mask.set(x, z, land);
        }
    }

    mask
}

/// Erode the land mask to the safe interior.
///
/// Scans vertices in row-major order, skipping anything within
/// `check_radius` cells of the grid border. A vertex qualifies when every
/// vertex of its (2*check_radius+1)^2 neighborhood is land; its 3D world
/// position (x, height, z) is appended to the result.
///
/// Cost is O(resolution^2 * check_radius^2).
pub fn extract_valid_points(
    heights: &Grid<f32>,
    mask: &Grid<bool>,
    config: &IslandConfig,
) -> Vec<Vec3> {
    let r = config.check_radius;
    let mut points = Vec::new();

    if mask.width <= 2 * r || mask.height <= 2 * r {
        return points;
    }

    for z in r..mask.height - r {
        for x in r..mask.width - r {
            if !neighborhood_is_land(mask, x, z, r) {
                continue;
            }
            let p = config.vertex_world(x, z);
            points.push(Vec3::new(p.x, *heights.get(x, z), p.y));
        }
    }

    points
}

fn neighborhood_is_land(mask: &Grid<bool>, x: usize, z: usize, r: usize) -> bool {
    for nz in z - r..=z + r {
        for nx in x - r..=x + r {
            if !*mask.get(nx, nz) {
                return false;
            }
        }
    }
    true
}
