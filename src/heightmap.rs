//! Heightmap generation from a terrain archetype.

use rayon::prelude::*;

use crate::archetypes::{Archetype, ArchetypeParams};
use crate::coherent::CoherentNoise;
use crate::error::Result;
use crate::grid::{Grid, HeightGrid};

/// Evaluate `archetype` over every cell of a `size x size` grid.
///
/// Heights are clamped at zero. The per-run parameters must already be
/// drawn: evaluation itself is a pure function of the cell, so rows are
/// filled in parallel without touching the random source.
pub fn generate_heightmap(
    archetype: Archetype,
    params: &ArchetypeParams,
    size: usize,
    noise: &CoherentNoise,
) -> Result<HeightGrid> {
    let mut heights = Grid::try_new_with(size, 0.0f32)?;
    if size == 0 {
        return Ok(heights);
    }

    heights
        .as_mut_slice()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = archetype.height(x, y, size, params, noise).max(0.0);
            }
        });

    Ok(heights)
}
