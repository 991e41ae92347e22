//! River carving into the height grid

use crate::coherent::{smoothstep, CoherentNoise};
use crate::error::Result;
use crate::grid::{Grid, HeightGrid};
use crate::river::params::{CarveMode, RiverParams};
use crate::river::path::{Point, RiverPath};

/// Inclusive cell bounds of a point's cut, clamped to the grid.
struct CutBounds {
    start_x: usize,
    end_x: usize,
    start_y: usize,
    end_y: usize,
}

/// Far-off points and huge radii saturate instead of wrapping.
fn cut_bounds(point: Point, radius: i64, size: usize) -> CutBounds {
    let max = size as i64 - 1;
    let cx = point.x.round() as i64;
    let cy = point.y.round() as i64;
    CutBounds {
        start_x: cx.saturating_sub(radius).clamp(0, max) as usize,
        end_x: cx.saturating_add(radius).clamp(0, max) as usize,
        start_y: cy.saturating_sub(radius).clamp(0, max) as usize,
        end_y: cy.saturating_add(radius).clamp(0, max) as usize,
    }
}

/// World-unit depth cut into cell `(x, y)` by a path point, or `None` if the
/// cell lies outside the channel.
fn cut_depth(x: usize, y: usize, point: Point, params: &RiverParams, noise: &CoherentNoise) -> Option<f32> {
    let half_width = params.width * 0.5;
    let distance = Point::new(x as f32, y as f32).distance(point);
    if distance > half_width {
        return None;
    }
    let normalized = distance / half_width;
    let depth_factor = smoothstep(1.0, 0.0, normalized);
    let bank = noise.sample(
        x as f64 * params.bank_noise_scale as f64,
        y as f64 * params.bank_noise_scale as f64,
    ) * params.bank_noise_amplitude;
    Some(params.depth * depth_factor + bank)
}

/// Carve `path` into `heights`, one point at a time in path order.
///
/// Depths are in world units and divided by `height_scale` before being
/// subtracted. Results are clamped at zero. With [`CarveMode::Cumulative`]
/// a cell reached by several points is lowered once per point.
pub fn carve(
    heights: &mut HeightGrid,
    path: &RiverPath,
    params: &RiverParams,
    height_scale: f32,
    noise: &CoherentNoise,
) -> Result<()> {
    let size = heights.size;
    if size == 0 || path.is_empty() || params.width <= 0.0 {
        return Ok(());
    }
    let radius = (params.width * 0.5).ceil() as i64;

    match params.carve_mode {
        CarveMode::Cumulative => {
            for &point in path.points() {
                let b = cut_bounds(point, radius, size);
                for y in b.start_y..=b.end_y {
                    for x in b.start_x..=b.end_x {
                        if let Some(depth) = cut_depth(x, y, point, params, noise) {
                            let h = heights.get_mut(x, y);
                            *h = (*h - depth / height_scale).max(0.0);
                        }
                    }
                }
            }
        }
        CarveMode::MaxDepth => {
            let mut deepest = Grid::try_new_with(size, 0.0f32)?;
            for &point in path.points() {
                let b = cut_bounds(point, radius, size);
                for y in b.start_y..=b.end_y {
                    for x in b.start_x..=b.end_x {
                        if let Some(depth) = cut_depth(x, y, point, params, noise) {
                            let d = deepest.get_mut(x, y);
                            *d = d.max(depth);
                        }
                    }
                }
            }
            for (h, &d) in heights.as_mut_slice().iter_mut().zip(deepest.as_slice()) {
                if d > 0.0 {
                    *h = (*h - d / height_scale).max(0.0);
                }
            }
        }
    }
    Ok(())
}
