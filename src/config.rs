//! Generation configuration
//!
//! A single record carrying every tuning knob for one island generation
//! pass. Defaults describe a 64-cell grid over a 24-unit square carrying
//! 1-5 plateau clusters.

use serde::{Deserialize, Serialize};

use crate::mesh::MaskRule;

/// Parameters for one full island generation pass.
///
/// A pass is a pure function of this record: the same config always
/// produces bit-identical terrain, masks, and meshes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Master seed; layout and placement sub-seeds are derived from it
    pub seed: u64,

    /// Grid cells per axis (the vertex lattice is resolution+1 per axis)
    pub resolution: usize,
    /// World-space side length of the island square, centered at the origin
    pub island_size: f32,

    /// Cluster count range (always at least one cluster, at the origin)
    pub min_clusters: usize,
    pub max_clusters: usize,
    /// Nominal cluster radius range
    pub min_radius: f32,
    pub max_radius: f32,
    /// Cluster plateau height range
    pub min_height: f32,
    pub max_height: f32,
    /// Distance range from the origin for secondary cluster centers
    pub min_dist: f32,
    pub max_dist: f32,

    /// Fraction of a cluster's effective radius that is flat-topped
    pub plateau_percent: f32,
    /// Per-cluster edge-noise frequency range
    pub min_noise_scale: f32,
    pub max_noise_scale: f32,
    /// Per-cluster edge-noise amplitude range (fraction of radius)
    pub min_noise_strength: f32,
    pub max_noise_strength: f32,
    /// Upper bound for the random per-cluster noise-domain offset
    pub noise_offset_max: f32,

    /// Minimum height for a vertex to classify as land
    pub land_height_threshold: f32,
    /// Conservative margin inside the island boundary; vertices whose
    /// radial distance exceeds island_size/2 - edge_margin are water
    pub edge_margin: f32,
    /// Erosion radius in grid cells: a valid point needs its whole
    /// (2*check_radius+1)^2 neighborhood on land
    pub check_radius: usize,

    /// Inclusion rule for the masked/compacted mesh variant
    pub mask_rule: MaskRule,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            resolution: 64,
            island_size: 24.0,
            min_clusters: 1,
            max_clusters: 5,
            min_radius: 4.0,
            max_radius: 7.0,
            min_height: 1.5,
            max_height: 3.5,
            min_dist: 6.0,
            max_dist: 12.0,
            plateau_percent: 0.8,
            min_noise_scale: 0.7,
            max_noise_scale: 1.4,
            min_noise_strength: 0.08,
            max_noise_strength: 0.25,
            noise_offset_max: 1000.0,
            land_height_threshold: 0.05,
            edge_margin: 1.0,
            check_radius: 2,
            mask_rule: MaskRule::default(),
        }
    }
}

impl IslandConfig {
    /// Number of vertices per axis.
    pub fn verts_per_axis(&self) -> usize {
        self.resolution + 1
    }

    /// Half the island's world-space side length.
    pub fn half_size(&self) -> f32 {
        self.island_size * 0.5
    }

    /// World position of the grid vertex at (x, z).
    /// The lattice spans [-island_size/2, +island_size/2] on both axes.
    pub fn vertex_world(&self, x: usize, z: usize) -> glam::Vec2 {
        let res = self.resolution as f32;
        glam::Vec2::new(
            (x as f32 / res - 0.5) * self.island_size,
            (z as f32 / res - 0.5) * self.island_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning() {
        let config = IslandConfig::default();
        assert_eq!(config.resolution, 64);
        assert_eq!(config.island_size, 24.0);
        assert_eq!(config.min_clusters, 1);
        assert_eq!(config.max_clusters, 5);
        assert_eq!(config.plateau_percent, 0.8);
    }

    #[test]
    fn test_vertex_world_spans_centered_square() {
        let config = IslandConfig {
            resolution: 4,
            island_size: 8.0,
            ..Default::default()
        };
        assert_eq!(config.vertex_world(0, 0), glam::Vec2::new(-4.0, -4.0));
        assert_eq!(config.vertex_world(2, 2), glam::Vec2::ZERO);
        assert_eq!(config.vertex_world(4, 4), glam::Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = IslandConfig {
            seed: 77,
            resolution: 32,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: IslandConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 77);
        assert_eq!(back.resolution, 32);
        assert_eq!(back.island_size, config.island_size);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let back: IslandConfig = serde_json::from_str(r#"{"seed": 5}"#).unwrap();
        assert_eq!(back.seed, 5);
        assert_eq!(back.resolution, 64);
    }
}
