//! Island data container and generation pipeline
//!
//! Bundles everything one generation pass produces into a single struct and
//! runs the pipeline: cluster layout, heightfield, land mask, interior
//! erosion, and both mesh variants. A pass is fully synchronous and owns
//! all of its outputs; every call rebuilds from the seed and config, nothing
//! is shared or mutated across passes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clusters::{self, Cluster};
use crate::config::IslandConfig;
use crate::grid::Grid;
use crate::heightfield;
use crate::landmask;
use crate::mesh::{self, Mesh};
use crate::noise_field::NoiseField;
use crate::placement::{self, PlacementBatch, PlacementConfig};
use crate::proximity::{self, ProximityConfig};
use crate::seeds::IslandSeeds;

/// All data generated by one island pass.
pub struct IslandData {
    /// Seeds used for generation (allows recreation)
    pub seeds: IslandSeeds,
    /// Configuration the pass was generated from
    pub config: IslandConfig,
    /// Influence clusters for this pass
    pub clusters: Vec<Cluster>,
    /// Per-vertex heights over the island square
    pub heights: Grid<f32>,
    /// Buildable-land classification per vertex
    pub land_mask: Grid<bool>,
    /// Safe interior points, in row-major scan order
    pub valid_points: Vec<glam::Vec3>,
    /// Dense mesh: the whole grid square
    pub mesh: Mesh,
    /// Land-only mesh with a compacted vertex set
    pub land_mesh: Mesh,
}

impl IslandData {
    /// Fraction of grid vertices classified as land.
    pub fn land_fraction(&self) -> f32 {
        let land = self.land_mask.iter().filter(|&(_, _, &l)| l).count();
        land as f32 / (self.land_mask.width * self.land_mask.height) as f32
    }

    /// Highest vertex of the pass.
    pub fn max_height(&self) -> f32 {
        self.heights
            .iter()
            .map(|(_, _, &h)| h)
            .fold(0.0f32, f32::max)
    }
}

/// Run one full generation pass.
///
/// Pure in config: the same record always yields bit-identical clusters,
/// heights, valid points, and meshes. The layout RNG is an explicit
/// ChaCha8 instance seeded from the derived layout seed, so generation
/// never touches shared random state.
pub fn generate_island(config: &IslandConfig) -> IslandData {
    let seeds = IslandSeeds::from_master(config.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seeds.layout);
    let noise = NoiseField::new(seeds.layout as u32);

    let clusters = clusters::generate_clusters(&mut rng, config);
    let heights = heightfield::build_height_grid(&clusters, &noise, config);
    let land_mask = landmask::extract_land_mask(&heights, config);
    let valid_points = landmask::extract_valid_points(&heights, &land_mask, config);
    let dense = mesh::build_dense_mesh(&heights, config);
    let land_mesh = mesh::build_masked_mesh(&heights, &land_mask, config, config.mask_rule);

    IslandData {
        seeds,
        config: config.clone(),
        clusters,
        heights,
        land_mask,
        valid_points,
        mesh: dense,
        land_mesh,
    }
}

/// Place resources on a generated island.
///
/// Thin wrapper that seeds the placement RNG from the island's derived
/// placement seed and stamps the batch with the given generation id.
pub fn place_resources(
    island: &IslandData,
    config: &PlacementConfig,
    generation: u64,
) -> PlacementBatch {
    let mut rng = ChaCha8Rng::seed_from_u64(island.seeds.placement);
    placement::place(
        &island.valid_points,
        config,
        island.config.island_size,
        generation,
        &mut rng,
    )
}

/// Place secondary entities around the anchors of a prior batch.
pub fn place_secondaries(
    island: &IslandData,
    anchors: &PlacementBatch,
    config: &ProximityConfig,
    generation: u64,
) -> PlacementBatch {
    let mut rng = ChaCha8Rng::seed_from_u64(island.seeds.proximity);
    let anchor_positions: Vec<glam::Vec3> =
        anchors.instances.iter().map(|i| i.position).collect();
    proximity::place_near(
        &anchor_positions,
        &island.valid_points,
        config,
        generation,
        &mut rng,
    )
}
