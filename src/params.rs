//! Generation parameters and their sanitization.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::river::RiverParams;

/// Where the random source gets its seed at the start of each run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// A fresh, non-reproducible seed every run
    #[default]
    Random,
    /// The same seed every run
    Fixed(u64),
}

impl SeedMode {
    /// Resolve to a concrete seed for one run.
    pub fn resolve(&self) -> u64 {
        match self {
            Self::Random => rand::random(),
            Self::Fixed(seed) => *seed,
        }
    }
}

/// Parameters for one terrain generation run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Cells per side of the square height grid
    pub grid_size: usize,
    /// World units per normalized height unit
    pub height_scale: f32,
    /// Side of the box-blur kernel (<= 1 disables smoothing)
    pub smoothing_kernel_size: usize,
    /// Number of box-blur passes
    pub smoothing_iterations: usize,
    pub river: RiverParams,
    pub seed: SeedMode,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            grid_size: 512,
            height_scale: 50.0,
            smoothing_kernel_size: 5,
            smoothing_iterations: 2,
            river: RiverParams::default(),
            seed: SeedMode::Random,
        }
    }
}

impl GenerationParams {
    /// Copy of `self` with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedMode::Fixed(seed);
        self
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Clamp every field into a range the pipeline can run with.
    ///
    /// Generation must always produce some terrain, so bad values are
    /// replaced by the nearest valid one and a warning is logged.
    pub fn sanitized(&self) -> Self {
        let mut p = self.clone();

        if p.grid_size == 0 {
            warn!("grid size 0 is invalid, using 1");
            p.grid_size = 1;
        }
        if !(p.height_scale.is_finite() && p.height_scale > 0.0) {
            warn!(height_scale = p.height_scale, "invalid height scale, using 1.0");
            p.height_scale = 1.0;
        }
        if p.smoothing_kernel_size > p.grid_size {
            warn!(
                kernel = p.smoothing_kernel_size,
                grid = p.grid_size,
                "smoothing kernel larger than grid, clamping"
            );
            p.smoothing_kernel_size = p.grid_size;
        }

        let r = &mut p.river;
        if !(r.width.is_finite() && r.width >= 0.0) {
            warn!(width = r.width, "invalid river width, disabling carve");
            r.width = 0.0;
        }
        let max_width = 2.0 * p.grid_size as f32;
        if r.width > max_width {
            warn!(width = r.width, max_width, "river wider than the map, clamping");
            r.width = max_width;
        }
        if !r.depth.is_finite() || r.depth < 0.0 {
            warn!(depth = r.depth, "invalid river depth, using 0");
            r.depth = 0.0;
        }
        if !r.curve_frequency.is_finite() {
            r.curve_frequency = 0.0;
        }
        if !r.bank_noise_scale.is_finite() {
            r.bank_noise_scale = 0.0;
        }
        if !r.bank_noise_amplitude.is_finite() || r.bank_noise_amplitude < 0.0 {
            r.bank_noise_amplitude = 0.0;
        }

        p
    }
}
