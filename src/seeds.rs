//! Seed management for island generation
//!
//! Provides separate seeds for the layout and placement systems, allowing
//! terrain shape and object placement to be varied independently.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all island generation systems.
///
/// Each system gets its own seed, derived from a master seed by default.
/// Individual seeds can be overridden for experimentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IslandSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Cluster layout and heightfield edge noise
    pub layout: u64,
    /// Grouped resource placement
    pub placement: u64,
    /// Proximity placement of secondary entities
    pub proximity: u64,
}

impl IslandSeeds {
    /// Create seeds from a master seed, deriving all sub-seeds deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            layout: derive_seed(master, "layout"),
            placement: derive_seed(master, "placement"),
            proximity: derive_seed(master, "proximity"),
        }
    }

    /// Override the layout seed (keeps placement tied to the master).
    pub fn with_layout(mut self, seed: u64) -> Self {
        self.layout = seed;
        self
    }

    /// Override the placement seed (keeps terrain tied to the master).
    pub fn with_placement(mut self, seed: u64) -> Self {
        self.placement = seed;
        self
    }

    /// Override the proximity seed.
    pub fn with_proximity(mut self, seed: u64) -> Self {
        self.proximity = seed;
        self
    }
}

/// Derive a sub-seed from a master seed and a system name.
/// Uses hashing to ensure different systems get different but deterministic seeds.
fn derive_seed(master: u64, system: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    system.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for IslandSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IslandSeeds {{ master: {}, layout: {}, placement: {}, proximity: {} }}",
            self.master, self.layout, self.placement, self.proximity,
        )
    }
}
