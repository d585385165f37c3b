//! Island generation library
//!
//! Procedurally synthesizes an island terrain surface and populates it with
//! spatially-constrained placements. Re-exports modules for use by the CLI
//! binary and external tools.

pub mod ascii;
pub mod clusters;
pub mod config;
pub mod export;
pub mod grid;
pub mod heightfield;
pub mod island;
pub mod landmask;
pub mod mesh;
pub mod noise_field;
pub mod placement;
pub mod proximity;
pub mod seeds;
