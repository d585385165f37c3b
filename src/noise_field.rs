//! Deterministic coherent-noise sampler
//!
//! Wraps a seeded Perlin generator behind a [0, 1] sampling contract.
//! Used for per-cluster edge-shape perturbation (sampled along a unit
//! circle to turn circular cluster boundaries into irregular blobs).

use noise::{NoiseFn, Perlin, Seedable};

/// Seeded 2D coherent-noise field.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(1).set_seed(seed),
        }
    }

    /// Sample the field at (u, v). Deterministic and continuous,
    /// remapped from Perlin's [-1, 1] to [0, 1].
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let raw = self.perlin.get([u as f64, v as f64]) as f32;
        (raw * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}
