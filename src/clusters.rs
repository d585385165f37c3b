//! Cluster layout
//!
//! Stochastically places the circular influence clusters whose combined
//! plateau-plus-fade profiles form the island's landmass. One cluster is
//! always anchored at the origin so the island never generates empty;
//! additional clusters land at a random angle and distance from it.
//! Centers may overlap freely; overlapping heights merge via max when the
//! heightfield is evaluated.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::config::IslandConfig;

/// A circular (noise-perturbed) region of elevated terrain.
///
/// The edge-noise parameters perturb the nominal radius into an irregular
/// blob when the heightfield samples the cluster boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cluster {
    pub center: Vec2,
    pub radius: f32,
    pub height: f32,
    /// Frequency of the boundary perturbation noise
    pub noise_scale: f32,
    /// Amplitude of the boundary perturbation, as a fraction of radius
    pub noise_strength: f32,
    /// Offset into the noise domain, decorrelating clusters from each other
    pub noise_offset: f32,
}

/// Generate the cluster list for one pass.
///
/// Draws the cluster count uniformly from the configured range, emits the
/// origin cluster first, then places the rest at `distance * (cos a, sin a)`
/// for a uniform angle and distance. Each cluster independently draws its
/// radius, height, and edge-noise parameters.
pub fn generate_clusters(rng: &mut ChaCha8Rng, config: &IslandConfig) -> Vec<Cluster> {
    let count = rng.gen_range(config.min_clusters..=config.max_clusters).max(1);
    let mut clusters = Vec::with_capacity(count);

    clusters.push(draw_cluster(rng, Vec2::ZERO, config));

    for _ in 1..count {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let dist = rng.gen_range(config.min_dist..=config.max_dist);
        let center = Vec2::new(angle.cos(), angle.sin()) * dist;
        clusters.push(draw_cluster(rng, center, config));
    }

    clusters
}

fn draw_cluster(rng: &mut ChaCha8Rng, center: Vec2, config: &IslandConfig) -> Cluster {
    Cluster {
        center,
        radius: rng.gen_range(config.min_radius..=config.max_radius),
        height: rng.gen_range(config.min_height..=config.max_height),
        noise_scale: rng.gen_range(config.min_noise_scale..=config.max_noise_scale),
        noise_strength: rng.gen_range(config.min_noise_strength..=config.max_noise_strength),
        noise_offset: rng.gen_range(0.0..=config.noise_offset_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_first_cluster_at_origin() {
        let config = IslandConfig::default();
        let clusters = generate_clusters(&mut rng(3), &config);
        assert_eq!(clusters[0].center, Vec2::ZERO);
    }

    #[test]
    fn test_count_within_range() {
        let config = IslandConfig::default();
        for seed in 0..20 {
            let clusters = generate_clusters(&mut rng(seed), &config);
            assert!(clusters.len() >= config.min_clusters);
            assert!(clusters.len() <= config.max_clusters);
        }
    }

    #[test]
    fn test_parameters_within_configured_ranges() {
        let config = IslandConfig::default();
        let clusters = generate_clusters(&mut rng(11), &config);
        for c in &clusters {
            assert!(c.radius >= config.min_radius && c.radius <= config.max_radius);
            assert!(c.height >= config.min_height && c.height <= config.max_height);
            assert!(c.noise_scale >= config.min_noise_scale && c.noise_scale <= config.max_noise_scale);
            assert!(
                c.noise_strength >= config.min_noise_strength
                    && c.noise_strength <= config.max_noise_strength
            );
            assert!(c.noise_offset >= 0.0 && c.noise_offset <= config.noise_offset_max);
        }
    }

    #[test]
    fn test_secondary_centers_within_distance_band() {
        let config = IslandConfig {
            min_clusters: 5,
            max_clusters: 5,
            ..Default::default()
        };
        let clusters = generate_clusters(&mut rng(21), &config);
        assert_eq!(clusters.len(), 5);
        for c in &clusters[1..] {
            let d = c.center.length();
            assert!(
                d >= config.min_dist - 1e-4 && d <= config.max_dist + 1e-4,
                "secondary cluster at distance {}",
                d
            );
        }
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let config = IslandConfig::default();
        let a = generate_clusters(&mut rng(42), &config);
        let b = generate_clusters(&mut rng(42), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_count_range() {
        let config = IslandConfig {
            min_clusters: 1,
            max_clusters: 1,
            ..Default::default()
        };
        let clusters = generate_clusters(&mut rng(0), &config);
        assert_eq!(clusters.len(), 1);
    }
}
