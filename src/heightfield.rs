//! Heightfield evaluation
//!
//! Evaluates the combined cluster influence at every grid vertex to produce
//! the island's height grid. Each cluster contributes a plateau-plus-fade
//! profile inside a noise-perturbed effective radius; contributions combine
//! via max so overlapping clusters merge into one smooth landmass instead
//! of stacking into spikes.
//!
//! Cost is O(resolution^2 * cluster_count); rows are independent, so the
//! evaluation runs in parallel over rows with identical output to the
//! serial loop.

use glam::Vec2;
use rayon::prelude::*;

use crate::clusters::Cluster;
use crate::config::IslandConfig;
use crate::grid::Grid;
use crate::noise_field::NoiseField;

/// Evaluate the height contribution of every cluster at world position `p`
/// and return the maximum.
///
/// Per cluster: the boundary noise, sampled along a cosine/sine-encoded
/// direction, perturbs the nominal radius outward into an effective radius.
/// Inside `effective_radius * plateau_percent` the cluster contributes its
/// full height; from the plateau edge the contribution fades linearly to
/// zero at the effective radius; beyond it the cluster contributes nothing.
pub fn sample_height(
    p: Vec2,
    clusters: &[Cluster],
    noise: &NoiseField,
    plateau_percent: f32,
) -> f32 {
    let mut h = 0.0f32;

    for cluster in clusters {
        let delta = p - cluster.center;
        let dist = delta.length();
        let angle = delta.y.atan2(delta.x);

        let edge_noise = noise.sample(
            angle.cos() * cluster.noise_scale + cluster.noise_offset,
            angle.sin() * cluster.noise_scale + cluster.noise_offset,
        ) * cluster.noise_strength;
        let effective_radius = cluster.radius * (1.0 + edge_noise);

        if dist > effective_radius {
            continue;
        }

        let plateau = effective_radius * plateau_percent;
        let contribution = if dist < plateau || effective_radius <= plateau {
            cluster.height
        } else {
            // Single linear ramp: full height at the plateau edge, zero at
            // the effective radius.
            cluster.height * (effective_radius - dist) / (effective_radius - plateau)
        };

        h = h.max(contribution);
    }

    h
}

/// Build the height grid for one pass: `resolution+1` vertices per axis
/// over the island square, each holding the max cluster contribution.
///
/// A vertex covered by no cluster stays at height zero (water), which is a
/// normal terrain configuration, not an error.
pub fn build_height_grid(
    clusters: &[Cluster],
    noise: &NoiseField,
    config: &IslandConfig,
) -> Grid<f32> {
    let verts = config.verts_per_axis();
    let mut grid = Grid::new_with(verts, verts, 0.0f32);
    let plateau_percent = config.plateau_percent;

    grid.as_mut_slice()
        .par_chunks_mut(verts)
        .enumerate()
        .for_each(|(z, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let p = config.vertex_world(x, z);
                *cell = sample_height(p, clusters, noise, plateau_percent);
            }
        });

    grid
}
