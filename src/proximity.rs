//! Proximity placement of secondary entities
//!
//! Places secondaries (guards, hazards) at a randomized offset from each
//! anchor position, typically the resource placements of a prior pass. The
//! baseline variant places unconditionally at the anchor's elevation with
//! no land-mask re-check; the optional snap mode re-anchors each secondary
//! to the nearest valid point instead.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::placement::{PlacedInstance, PlacementBatch};

/// Tuning for one proximity pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Secondaries placed around each anchor
    pub count_per_anchor: usize,
    /// Offset distance band from the anchor
    pub min_dist: f32,
    pub max_dist: f32,
    /// Size of the external archetype catalog; zero makes the pass a no-op
    pub archetype_count: usize,
    /// Snap each secondary to the nearest valid point instead of placing
    /// unconditionally. Off by default: the unchecked variant is the
    /// documented baseline, and it can put secondaries in the water.
    pub snap_to_valid: bool,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            count_per_anchor: 1,
            min_dist: 2.0,
            max_dist: 4.0,
            archetype_count: 1,
            snap_to_valid: false,
        }
    }
}

/// Place secondaries around each anchor.
///
/// Per anchor and per secondary: draw a uniform unit direction in the XZ
/// plane and a distance in `[min_dist, max_dist]`, then place at
/// `anchor + direction * distance` at the anchor's elevation.
pub fn place_near(
    anchors: &[Vec3],
    valid_points: &[Vec3],
    config: &ProximityConfig,
    generation: u64,
    rng: &mut ChaCha8Rng,
) -> PlacementBatch {
    if config.archetype_count == 0 {
        println!("  Proximity placement skipped: archetype catalog is empty");
        return PlacementBatch::empty(generation);
    }
    if anchors.is_empty() {
        println!("  Proximity placement skipped: no anchors");
        return PlacementBatch::empty(generation);
    }

    let mut instances = Vec::with_capacity(anchors.len() * config.count_per_anchor);

    for &anchor in anchors {
        for _ in 0..config.count_per_anchor {
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let dist = rng.gen_range(config.min_dist..=config.max_dist);
            let offset = Vec3::new(angle.cos() * dist, 0.0, angle.sin() * dist);
            let mut position = anchor + offset;

            if config.snap_to_valid {
                if let Some(snapped) = nearest(valid_points, position) {
                    position = snapped;
                }
            }

            instances.push(PlacedInstance {
                position,
                archetype: rng.gen_range(0..config.archetype_count),
            });
        }
    }

    PlacementBatch {
        generation,
        instances,
    }
}

fn nearest(points: &[Vec3], candidate: Vec3) -> Option<Vec3> {
    points
        .iter()
        .copied()
        .min_by(|a, b| {
            a.distance_squared(candidate)
                .total_cmp(&b.distance_squared(candidate))
        })
}
