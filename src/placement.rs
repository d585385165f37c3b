//! Constrained placement engine
//!
//! Picks positions for resource entities from the valid-point set. Three
//! strategies share one engine, selected by configuration:
//! - uniform random draws over the filtered valid points,
//! - minimum-spacing rejection sampling,
//! - grouped clustering: spaced group centers, then members rejection-
//!   sampled inside a disk around each center and snapped to the nearest
//!   valid point.
//!
//! All sampling is bounded by fixed attempt budgets, so a pass never spins
//! unbounded: exhausting a budget degrades to fewer placements, not an
//! error. Each batch carries a generation counter; the scene collaborator
//! diffs old vs. new batches by generation id to retire prior instances.

use glam::Vec3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Attempt budget for group-center selection across a whole pass.
const GROUP_CENTER_ATTEMPTS: usize = 1000;
/// Attempt budget for member placement within one group.
const MEMBER_ATTEMPTS: usize = 100;

/// How candidate positions are drawn from the valid-point set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlacementStrategy {
    /// Uniform draws over the filtered valid points, no spacing constraint.
    UniformRandom { count: usize },
    /// Rejection sampling with a minimum pairwise distance between
    /// accepted placements.
    MinSpacing { count: usize, min_distance: f32 },
    /// Grouped clustering: spaced group centers, disk-sampled members.
    Grouped,
}

/// Tuning for one placement pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub strategy: PlacementStrategy,
    /// Group count range (Grouped strategy)
    pub min_groups: usize,
    pub max_groups: usize,
    /// Member count range per group (Grouped strategy)
    pub min_in_group: usize,
    pub max_in_group: usize,
    /// Disk radius for member sampling around a group center
    pub group_radius: f32,
    /// Minimum distance between accepted group centers
    pub min_distance_between_groups: f32,
    /// Extra radial margin: valid points closer than this to the island
    /// boundary are never used (on top of the interior erosion)
    pub group_center_edge_margin: f32,
    /// Size of the external archetype catalog; each instance draws its
    /// archetype index uniformly from it. Zero makes the pass a no-op.
    pub archetype_count: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            strategy: PlacementStrategy::Grouped,
            min_groups: 3,
            max_groups: 6,
            min_in_group: 3,
            max_in_group: 8,
            group_radius: 3.0,
            min_distance_between_groups: 6.0,
            group_center_edge_margin: 2.0,
            archetype_count: 1,
        }
    }
}

/// One placed entity: a position plus an opaque index into an external
/// archetype catalog. What the index renders as is not this crate's concern.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstance {
    pub position: Vec3,
    pub archetype: usize,
}

/// All instances emitted by one placement pass.
///
/// The generation id is the retirement handle: a collaborator keeps the
/// latest batch and destroys everything tagged with an older generation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementBatch {
    pub generation: u64,
    pub instances: Vec<PlacedInstance>,
}

impl PlacementBatch {
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            instances: Vec::new(),
        }
    }
}

/// Run one placement pass over the valid-point set.
///
/// Degenerate inputs degrade to an empty batch with a diagnostic, never an
/// error: no valid points, an empty archetype catalog, or exhausted attempt
/// budgets all produce at-most-requested, possibly fewer, placements.
pub fn place(
    valid_points: &[Vec3],
    config: &PlacementConfig,
    island_size: f32,
    generation: u64,
    rng: &mut ChaCha8Rng,
) -> PlacementBatch {
    if config.archetype_count == 0 {
        println!("  Placement skipped: archetype catalog is empty");
        return PlacementBatch::empty(generation);
    }

    let filtered = filter_inner_points(valid_points, island_size, config.group_center_edge_margin);
    if filtered.is_empty() {
        println!("  Placement skipped: no valid points inside the edge margin");
        return PlacementBatch::empty(generation);
    }

    let instances = match config.strategy {
        PlacementStrategy::UniformRandom { count } => {
            place_uniform(&filtered, count, config.archetype_count, rng)
        }
        PlacementStrategy::MinSpacing {
            count,
            min_distance,
        } => place_min_spacing(&filtered, count, min_distance, config.archetype_count, rng),
        PlacementStrategy::Grouped => place_grouped(&filtered, config, rng),
    };

    PlacementBatch {
        generation,
        instances,
    }
}

/// Keep only valid points whose radial distance stays at least `margin`
/// inside the island boundary (measured in the XZ plane).
fn filter_inner_points(valid_points: &[Vec3], island_size: f32, margin: f32) -> Vec<Vec3> {
    let max_radius = island_size * 0.5 - margin;
    valid_points
        .iter()
        .copied()
        .filter(|p| (p.x * p.x + p.z * p.z).sqrt() < max_radius)
        .collect()
}

fn place_uniform(
    filtered: &[Vec3],
    count: usize,
    archetype_count: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<PlacedInstance> {
    (0..count)
        .map(|_| PlacedInstance {
            position: filtered[rng.gen_range(0..filtered.len())],
            archetype: rng.gen_range(0..archetype_count),
        })
        .collect()
}

fn place_min_spacing(
    filtered: &[Vec3],
    count: usize,
    min_distance: f32,
    archetype_count: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<PlacedInstance> {
    let min_sq = min_distance * min_distance;
    let mut accepted: Vec<Vec3> = Vec::new();
    let mut attempts = 0;

    while accepted.len() < count && attempts < GROUP_CENTER_ATTEMPTS {
        attempts += 1;
        let candidate = filtered[rng.gen_range(0..filtered.len())];
        if accepted
            .iter()
            .all(|p| p.distance_squared(candidate) >= min_sq)
        {
            accepted.push(candidate);
        }
    }

    accepted
        .into_iter()
        .map(|position| PlacedInstance {
            position,
            archetype: rng.gen_range(0..archetype_count),
        })
        .collect()
}

fn place_grouped(
    filtered: &[Vec3],
    config: &PlacementConfig,
    rng: &mut ChaCha8Rng,
) -> Vec<PlacedInstance> {
    let target_groups = rng
        .gen_range(config.min_groups..=config.max_groups)
        .min(filtered.len());

    let centers = select_group_centers(
        filtered,
        target_groups,
        config.min_distance_between_groups,
        rng,
    );

    let snap_radius = config.group_radius * 1.5;
    let mut instances = Vec::new();

    for &center in &centers {
        let target_members = rng.gen_range(config.min_in_group..=config.max_in_group);
        let mut placed = 0;
        let mut attempts = 0;

        while placed < target_members && attempts < MEMBER_ATTEMPTS {
            attempts += 1;

            // Uniform sample inside the group disk.
            let angle = rng.gen::<f32>() * std::f32::consts::TAU;
            let r = config.group_radius * rng.gen::<f32>().sqrt();
            let candidate = center + Vec3::new(angle.cos() * r, 0.0, angle.sin() * r);

            if let Some(snapped) = nearest_within(filtered, candidate, snap_radius) {
                instances.push(PlacedInstance {
                    position: snapped,
                    archetype: rng.gen_range(0..config.archetype_count),
                });
                placed += 1;
            }
        }
    }

    instances
}

/// Rejection-sample group centers from the filtered points, accepting a
/// candidate only when it keeps the minimum spacing to every center already
/// accepted. Stops at the attempt budget; partial success is acceptable.
fn select_group_centers(
    filtered: &[Vec3],
    target: usize,
    min_distance: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec3> {
    let min_sq = min_distance * min_distance;
    let mut centers: Vec<Vec3> = Vec::new();
    let mut attempts = 0;

    while centers.len() < target && attempts < GROUP_CENTER_ATTEMPTS {
        attempts += 1;
        let candidate = filtered[rng.gen_range(0..filtered.len())];
        if centers
            .iter()
            .all(|c| c.distance_squared(candidate) >= min_sq)
        {
            centers.push(candidate);
        }
    }

    if centers.len() < target {
        println!(
            "  Group-center budget exhausted: {} of {} groups placed",
            centers.len(),
            target
        );
    }

    centers
}

/// Closest point to `candidate` within `radius`, or None.
fn nearest_within(points: &[Vec3], candidate: Vec3, radius: f32) -> Option<Vec3> {
    let radius_sq = radius * radius;
    points
        .iter()
        .copied()
        .map(|p| (p, p.distance_squared(candidate)))
        .filter(|&(_, d)| d <= radius_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// A dense lattice of valid points around the origin, elevation 1.
    fn lattice(half_extent: i32, step: f32) -> Vec<Vec3> {
        let mut points = Vec::new();
        for z in -half_extent..=half_extent {
            for x in -half_extent..=half_extent {
                points.push(Vec3::new(x as f32 * step, 1.0, z as f32 * step));
            }
        }
        points
    }

    #[test]
    fn test_empty_valid_points_is_not_fatal() {
        let config = PlacementConfig::default();
        let batch = place(&[], &config, 24.0, 1, &mut rng(0));
        assert!(batch.instances.is_empty());
        assert_eq!(batch.generation, 1);
    }

    #[test]
    fn test_empty_catalog_is_a_noop() {
        let config = PlacementConfig {
            archetype_count: 0,
            ..Default::default()
        };
        let batch = place(&lattice(8, 0.5), &config, 24.0, 2, &mut rng(0));
        assert!(batch.instances.is_empty());
    }

    #[test]
    fn test_single_group_single_member() {
        // One group of one member must produce exactly one placement,
        // within group_radius * 1.5 of some valid point (trivially: it IS
        // a valid point).
        let points = lattice(6, 0.5);
        let config = PlacementConfig {
            min_groups: 1,
            max_groups: 1,
            min_in_group: 1,
            max_in_group: 1,
            ..Default::default()
        };
        let batch = place(&points, &config, 24.0, 1, &mut rng(7));

        assert_eq!(batch.instances.len(), 1);
        let pos = batch.instances[0].position;
        assert!(points.contains(&pos), "placement must snap to a valid point");
    }

    #[test]
    fn test_group_count_and_member_bounds() {
        let points = lattice(10, 0.5);
        let config = PlacementConfig {
            min_groups: 2,
            max_groups: 4,
            min_in_group: 1,
            max_in_group: 3,
            min_distance_between_groups: 2.0,
            ..Default::default()
        };
        for seed in 0..10 {
            let batch = place(&points, &config, 24.0, 1, &mut rng(seed));
            assert!(
                batch.instances.len() <= config.max_groups * config.max_in_group,
                "{} instances exceeds the group bound",
                batch.instances.len()
            );
        }
    }

    #[test]
    fn test_group_centers_respect_min_spacing() {
        let points = lattice(10, 0.5);
        let centers = select_group_centers(&points, 4, 3.0, &mut rng(13));

        for (i, a) in centers.iter().enumerate() {
            for b in &centers[i + 1..] {
                assert!(
                    a.distance(*b) >= 3.0,
                    "centers {:?} and {:?} too close",
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_budget_exhaustion_degrades_gracefully() {
        // Three points, all within 1 unit of each other, but 10 units of
        // spacing demanded: only one center can ever be accepted.
        let points = vec![
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.5, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.5),
        ];
        let centers = select_group_centers(&points, 3, 10.0, &mut rng(3));
        assert_eq!(centers.len(), 1);
    }

    #[test]
    fn test_placements_snap_within_group_reach() {
        let points = lattice(10, 0.5);
        let config = PlacementConfig {
            min_groups: 2,
            max_groups: 2,
            min_in_group: 4,
            max_in_group: 4,
            group_radius: 2.0,
            min_distance_between_groups: 4.0,
            ..Default::default()
        };
        let batch = place(&points, &config, 24.0, 1, &mut rng(5));

        // Every instance is a snapped valid point.
        for inst in &batch.instances {
            assert!(points.contains(&inst.position));
        }
    }

    #[test]
    fn test_archetype_indices_within_catalog() {
        let points = lattice(8, 0.5);
        let config = PlacementConfig {
            archetype_count: 3,
            ..Default::default()
        };
        let batch = place(&points, &config, 24.0, 1, &mut rng(9));
        assert!(!batch.instances.is_empty());
        for inst in &batch.instances {
            assert!(inst.archetype < 3);
        }
    }

    #[test]
    fn test_edge_margin_filters_boundary_points() {
        // Points at radius 11 on a 24-unit island with a 2-unit margin
        // (cutoff radius 10) must never be used.
        let mut points = lattice(4, 0.5);
        points.push(Vec3::new(11.0, 1.0, 0.0));
        let config = PlacementConfig {
            strategy: PlacementStrategy::UniformRandom { count: 50 },
            group_center_edge_margin: 2.0,
            ..Default::default()
        };
        let batch = place(&points, &config, 24.0, 1, &mut rng(2));
        assert_eq!(batch.instances.len(), 50);
        for inst in &batch.instances {
            assert!((inst.position.x.powi(2) + inst.position.z.powi(2)).sqrt() < 10.0);
        }
    }

    #[test]
    fn test_min_spacing_strategy() {
        let points = lattice(10, 0.5);
        let config = PlacementConfig {
            strategy: PlacementStrategy::MinSpacing {
                count: 5,
                min_distance: 2.0,
            },
            ..Default::default()
        };
        let batch = place(&points, &config, 24.0, 1, &mut rng(4));

        assert!(batch.instances.len() <= 5);
        for (i, a) in batch.instances.iter().enumerate() {
            for b in &batch.instances[i + 1..] {
                assert!(a.position.distance(b.position) >= 2.0);
            }
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let points = lattice(10, 0.5);
        let config = PlacementConfig::default();
        let a = place(&points, &config, 24.0, 1, &mut rng(17));
        let b = place(&points, &config, 24.0, 1, &mut rng(17));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_counter_passes_through() {
        let points = lattice(4, 0.5);
        let config = PlacementConfig::default();
        let batch = place(&points, &config, 24.0, 41, &mut rng(0));
        assert_eq!(batch.generation, 41);
    }
}
