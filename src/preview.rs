//! Heightmap previews: colour-gradient PNG and terminal ASCII.
//!
//! Both views are lossy and meant for eyeballing a run, not for storing
//! terrain.

use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::error::Result;
use crate::grid::HeightGrid;
use crate::river::RiverPath;

const RIVER_COLOR: Rgb<u8> = Rgb([40, 90, 220]);
const RIVER_CHAR: char = '@';

/// Colour for a normalized height in [0, 1].
pub fn height_color(h: f32) -> (u8, u8, u8) {
    let h = h.clamp(0.0, 1.0);

    if h < 0.02 {
        // Sea level: shallow blue
        (60, 110, 170)
    } else if h < 0.25 {
        // Lowlands: green
        let t = (h - 0.02) / 0.23;
        let r = (70.0 + t * 30.0) as u8;
        let g = (150.0 - t * 10.0) as u8;
        let b = (60.0 - t * 10.0) as u8;
        (r, g, b)
    } else if h < 0.6 {
        // Hills: brown/tan
        let t = (h - 0.25) / 0.35;
        let r = (110.0 + t * 40.0) as u8;
        let g = (120.0 - t * 30.0) as u8;
        let b = (60.0 + t * 10.0) as u8;
        (r, g, b)
    } else if h < 0.85 {
        // Ridges: gray rock
        let t = (h - 0.6) / 0.25;
        let r = (130.0 + t * 40.0) as u8;
        let g = (120.0 + t * 40.0) as u8;
        let b = (110.0 + t * 50.0) as u8;
        (r, g, b)
    } else {
        let t = (h - 0.85) / 0.15;
        let v = (200.0 + t * 55.0) as u8;
        (v, v, v)
    }
}

/// ASCII character for a normalized height (11-level ramp).
pub fn height_char(h: f32) -> char {
    const CHARS: &[char] = &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A', 'M'];
    let normalized = h.clamp(0.0, 1.0);
    let idx = (normalized * (CHARS.len() - 1) as f32) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Cells covered by the river path, as `(x, y)` indices inside the grid.
fn river_cells(path: Option<&RiverPath>, size: usize) -> Vec<(usize, usize)> {
    let Some(path) = path else {
        return Vec::new();
    };
    path.points()
        .iter()
        .filter_map(|p| {
            let x = p.x.round();
            let y = p.y.round();
            if x < 0.0 || y < 0.0 || x >= size as f32 || y >= size as f32 {
                None
            } else {
                Some((x as usize, y as usize))
            }
        })
        .collect()
}

/// Render the grid as an RGB image with the river drawn on top.
pub fn render_image(heights: &HeightGrid, river: Option<&RiverPath>) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let size = heights.size as u32;
    let mut img = ImageBuffer::from_fn(size, size, |x, y| {
        let (r, g, b) = height_color(*heights.get(x as usize, y as usize));
        Rgb([r, g, b])
    });
    for (x, y) in river_cells(river, heights.size) {
        img.put_pixel(x as u32, y as u32, RIVER_COLOR);
    }
    img
}

/// Save a PNG preview of the grid.
pub fn save_png<P: AsRef<Path>>(heights: &HeightGrid, river: Option<&RiverPath>, path: P) -> Result<()> {
    render_image(heights, river).save(path.as_ref())?;
    Ok(())
}

/// Render the grid as ASCII, downsampled to at most `max_cols` columns.
///
/// Each character averages a square block of cells. River cells win over
/// terrain in their block.
pub fn render_ascii(heights: &HeightGrid, river: Option<&RiverPath>, max_cols: usize) -> String {
    let size = heights.size;
    if size == 0 || max_cols == 0 {
        return String::new();
    }
    let step = size.div_ceil(max_cols).max(1);
    let cols = size.div_ceil(step);

    let mut river_blocks = vec![false; cols * cols];
    for (x, y) in river_cells(river, size) {
        river_blocks[(y / step) * cols + x / step] = true;
    }

    let mut result = String::with_capacity((cols + 1) * cols);
    for by in 0..cols {
        for bx in 0..cols {
            if river_blocks[by * cols + bx] {
                result.push(RIVER_CHAR);
                continue;
            }
            let mut sum = 0.0f32;
            let mut count = 0usize;
            for y in (by * step)..((by + 1) * step).min(size) {
                for x in (bx * step)..((bx + 1) * step).min(size) {
                    sum += *heights.get(x, y);
                    count += 1;
                }
            }
            result.push(height_char(sum / count as f32));
        }
        result.push('\n');
    }

    result
}

/// Legend for the ASCII ramp.
pub fn height_legend() -> String {
    format!("Height: ~ . - = + * # % ^ A M (low -> high), {} river", RIVER_CHAR)
}
