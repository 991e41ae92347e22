//! Procedural terrain generation library
//!
//! Synthesizes a square heightmap from one of five terrain archetypes and
//! optionally carves a river into it. Re-exports modules for use by
//! binaries and tools.

pub mod archetypes;
pub mod coherent;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod heightmap;
pub mod params;
pub mod preview;
pub mod random;
pub mod river;
pub mod smoothing;

pub use archetypes::{Archetype, ArchetypeParams};
pub use error::TerrainError;
pub use generator::{generate_terrain, TerrainGenerator, TerrainResult};
pub use grid::{Grid, HeightGrid};
pub use params::{GenerationParams, SeedMode};
pub use river::{CarveMode, Point, RiverParams, RiverPath};
