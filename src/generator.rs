//! Generation orchestrator
//!
//! Runs the pipeline in a fixed order so that a fixed seed always yields the
//! same terrain:
//! 1. Clamp the archetype index and sanitize parameters
//! 2. Reseed the random source
//! 3. Draw the archetype's per-run parameters
//! 4. Evaluate the heightmap (no draws)
//! 5. Draw once against the river chance; plan and carve if it hits
//! 6. Smooth
//!
//! [`TerrainGenerator`] wraps this with the state a game layer needs: the
//! last grid and river path, and height queries against them.

use tracing::{debug, info, warn};

use crate::archetypes::{self, Archetype, ArchetypeParams};
use crate::coherent::CoherentNoise;
use crate::error::{Result, TerrainError};
use crate::grid::HeightGrid;
use crate::heightmap::generate_heightmap;
use crate::params::GenerationParams;
use crate::random::RandomSource;
use crate::river::{generate_river, RiverPath};
use crate::smoothing::smooth;

/// Output of one generation run.
#[derive(Clone, Debug)]
pub struct TerrainResult {
    pub archetype: Archetype,
    /// Seed the run actually used; replay with `SeedMode::Fixed(seed)`
    pub seed: u64,
    pub archetype_params: ArchetypeParams,
    /// Normalized heights after carving and smoothing
    pub heights: HeightGrid,
    pub river: Option<RiverPath>,
    pub height_scale: f32,
}

impl TerrainResult {
    /// Heights in world units.
    pub fn world_heights(&self) -> HeightGrid {
        self.heights.scaled(self.height_scale)
    }

    /// World-unit height at grid cell `(x, z)`.
    pub fn try_height_at(&self, x: i64, z: i64) -> Result<f32> {
        self.heights
            .get_checked(x, z)
            .map(|&h| h * self.height_scale)
            .ok_or(TerrainError::OutOfBounds { x, z, size: self.heights.size })
    }
}

/// Run the full pipeline with a fresh random source.
pub fn generate_terrain(archetype_index: i64, params: &GenerationParams) -> Result<TerrainResult> {
    let mut rng = RandomSource::new(0);
    generate_terrain_with(archetype_index, params, &mut rng)
}

/// Run the full pipeline, reseeding and drawing from `rng`.
pub fn generate_terrain_with(
    archetype_index: i64,
    params: &GenerationParams,
    rng: &mut RandomSource,
) -> Result<TerrainResult> {
    let clamped = archetypes::clamp_index(archetype_index);
    if clamped as i64 != archetype_index {
        warn!(requested = archetype_index, used = clamped, "archetype index clamped");
    }
    let archetype = archetypes::archetype(clamped)?;
    let params = params.sanitized();
    let size = params.grid_size;

    let seed = params.seed.resolve();
    rng.reseed(seed);
    info!(archetype = archetype.name(), seed, size, "generating terrain");

    let archetype_params = archetype.derive_params(rng);
    debug!(?archetype_params, "derived per-run parameters");

    let noise = CoherentNoise::new();
    let mut heights = generate_heightmap(archetype, &archetype_params, size, &noise)?;

    let river = if rng.next_unit() < archetype.river_chance() as f64 {
        let path = generate_river(
            &mut heights,
            archetype.river_start(),
            archetype.river_end(),
            &params.river,
            params.height_scale,
            &noise,
            rng,
        )?;
        debug!(points = path.len(), length = path.length(), "carved river");
        Some(path)
    } else {
        debug!("no river this run");
        None
    };

    let heights = smooth(heights, params.smoothing_kernel_size, params.smoothing_iterations)?;
    let (min_h, max_h) = heights.min_max();
    debug!(min_h, max_h, "terrain ready");

    Ok(TerrainResult {
        archetype,
        seed,
        archetype_params,
        heights,
        river,
        height_scale: params.height_scale,
    })
}

/// Stateful front end: owns the random source and the latest terrain.
///
/// Each generation replaces the previous grid and river path.
pub struct TerrainGenerator {
    params: GenerationParams,
    rng: RandomSource,
    selected: Archetype,
    current: Option<TerrainResult>,
    river_path: RiverPath,
}

impl TerrainGenerator {
    pub fn new(params: GenerationParams) -> Self {
        Self {
            params,
            rng: RandomSource::new(0),
            selected: Archetype::Plains,
            current: None,
            river_path: RiverPath::default(),
        }
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Replace the parameters used by subsequent runs.
    pub fn set_params(&mut self, params: GenerationParams) {
        self.params = params;
    }

    /// Generate terrain for the archetype at `index` (clamped into range).
    pub fn select_archetype_and_generate(&mut self, index: i64) -> Result<()> {
        let result = generate_terrain_with(index, &self.params, &mut self.rng)?;
        self.selected = result.archetype;
        self.river_path = result.river.clone().unwrap_or_default();
        self.current = Some(result);
        Ok(())
    }

    pub fn generate_plains(&mut self) -> Result<()> {
        self.select_archetype_and_generate(Archetype::Plains.index() as i64)
    }

    pub fn generate_seaside(&mut self) -> Result<()> {
        self.select_archetype_and_generate(Archetype::Seaside.index() as i64)
    }

    pub fn generate_cliffs(&mut self) -> Result<()> {
        self.select_archetype_and_generate(Archetype::SeasideCliff.index() as i64)
    }

    pub fn generate_cauldron(&mut self) -> Result<()> {
        self.select_archetype_and_generate(Archetype::Cauldron.index() as i64)
    }

    pub fn generate_valley(&mut self) -> Result<()> {
        self.select_archetype_and_generate(Archetype::Valley.index() as i64)
    }

    /// Archetype of the most recent run (Plains before the first run).
    pub fn current_archetype(&self) -> Archetype {
        self.selected
    }

    /// Normalized heights of the most recent run.
    pub fn heightmap(&self) -> Option<&HeightGrid> {
        self.current.as_ref().map(|r| &r.heights)
    }

    pub fn last_result(&self) -> Option<&TerrainResult> {
        self.current.as_ref()
    }

    /// River of the most recent run; empty if none was carved.
    pub fn current_river_path(&self) -> &RiverPath {
        &self.river_path
    }

    /// World-unit height at `(x, z)`, or an error naming why there is none.
    pub fn try_height_at(&self, x: i64, z: i64) -> Result<f32> {
        self.current
            .as_ref()
            .ok_or(TerrainError::NotGenerated)?
            .try_height_at(x, z)
    }

    /// World-unit height at `(x, z)`; 0.0 with a warning when out of bounds.
    pub fn height_at(&self, x: i64, z: i64) -> f32 {
        match self.try_height_at(x, z) {
            Ok(h) => h,
            Err(e) => {
                warn!("{}", e);
                0.0
            }
        }
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(GenerationParams::default())
    }
}
