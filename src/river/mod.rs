//! River generation
//!
//! Two stages run back to back when a run triggers a river:
//! - **Path planning**: a straight start-to-end line with sinusoidal,
//!   randomly scaled sideways jitter, one point per unit of length
//! - **Carving**: each path point cuts a smooth, noise-roughened dip into
//!   the height grid. Points are carved in path order and overlapping cuts
//!   compound unless [`CarveMode::MaxDepth`] is selected

pub mod carve;
pub mod params;
pub mod path;

pub use carve::carve;
pub use params::{CarveMode, RiverParams};
pub use path::{plan_path, Point, RiverPath};

use crate::coherent::CoherentNoise;
use crate::error::Result;
use crate::grid::HeightGrid;
use crate::random::RandomSource;

/// Plan a river between two normalized map positions and carve it.
///
/// `start`/`end` are in [0, 1]² and are scaled by the grid size first.
/// Returns the grid-space path that was carved.
pub fn generate_river(
    heights: &mut HeightGrid,
    start: Point,
    end: Point,
    params: &RiverParams,
    height_scale: f32,
    noise: &CoherentNoise,
    rng: &mut RandomSource,
) -> Result<RiverPath> {
    let size = heights.size as f32;
    let path = plan_path(start.scaled(size), end.scaled(size), rng, params.curve_frequency, params.width);
    carve(heights, &path, params, height_scale, noise)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_generate_river_scales_endpoints() {
        let mut heights = Grid::try_new_with(32, 0.5f32).unwrap();
        let mut rng = RandomSource::new(5);
        let noise = CoherentNoise::new();
        let params = RiverParams::default();

        let path = generate_river(
            &mut heights,
            Point::new(0.5, 0.0),
            Point::new(0.5, 1.0),
            &params,
            50.0,
            &noise,
            &mut rng,
        )
        .unwrap();

        assert_eq!(path.len(), 33);
        assert_eq!(path.points()[0], Point::new(16.0, 0.0));
        let (min_h, _) = heights.min_max();
        assert!(min_h < 0.5, "river should have lowered something, min {}", min_h);
    }
}
