//! Iterated box-blur smoothing with edge replication.

use rayon::prelude::*;

use crate::error::Result;
use crate::grid::{Grid, HeightGrid};

/// Offsets covered by a box kernel of side `kernel_size`, centred on
/// `kernel_size / 2`.
///
/// An even side covers exactly `kernel_size` cells, one more behind the
/// centre than ahead of it. It does not widen to a symmetric
/// `2 * (k / 2) + 1` window, so even kernels give different output from a
/// blur that does.
fn kernel_span(kernel_size: usize) -> (i64, i64) {
    let half = (kernel_size / 2) as i64;
    (-half, kernel_size as i64 - 1 - half)
}

/// Smooth `heights` with `iterations` sequential box-blur passes.
///
/// Each pass reads one buffer and writes the other, then the roles swap.
/// Window reads past the border replicate the edge cell. A kernel of side
/// one or less leaves the grid unchanged.
pub fn smooth(heights: HeightGrid, kernel_size: usize, iterations: usize) -> Result<HeightGrid> {
    let size = heights.size;
    if iterations == 0 || kernel_size <= 1 || size == 0 {
        return Ok(heights);
    }

    let (lo, hi) = kernel_span(kernel_size);
    let count = (kernel_size * kernel_size) as f32;

    let mut source = heights;
    let mut target = Grid::try_new_with(size, 0.0f32)?;

    for _ in 0..iterations {
        let src = &source;
        target
            .as_mut_slice()
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let mut sum = 0.0f32;
                    for ky in lo..=hi {
                        for kx in lo..=hi {
                            sum += *src.get_clamped(x as i64 + kx, y as i64 + ky);
                        }
                    }
                    *cell = sum / count;
                }
            });
        std::mem::swap(&mut source, &mut target);
    }

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RandomSource;

    fn noisy(size: usize, seed: u64) -> HeightGrid {
        let mut rng = RandomSource::new(seed);
        let mut grid = Grid::try_new_with(size, 0.0f32).unwrap();
        for cell in grid.as_mut_slice() {
            *cell = rng.next_unit() as f32;
        }
        grid
    }

    #[test]
    fn test_zero_iterations_is_identity() {
        let grid = noisy(16, 1);
        let out = smooth(grid.clone(), 5, 0).unwrap();
        assert!(out.bit_identical(&grid));
    }

    #[test]
    fn test_unit_kernel_is_identity() {
        let grid = noisy(16, 2);
        let out = smooth(grid.clone(), 1, 7).unwrap();
        assert!(out.bit_identical(&grid));
        let out = smooth(grid.clone(), 0, 3).unwrap();
        assert!(out.bit_identical(&grid));
    }

    #[test]
    fn test_constant_grid_unchanged() {
        let grid = Grid::try_new_with(10, 0.5f32).unwrap();
        let out = smooth(grid, 4, 3).unwrap();
        for (x, y, &h) in out.iter() {
            assert!((h - 0.5).abs() < 1e-6, "constant grid drifted to {} at ({}, {})", h, x, y);
        }
    }

    #[test]
    fn test_single_pass_is_window_mean() {
        let mut grid = Grid::try_new_with(5, 0.0f32).unwrap();
        grid.set(2, 2, 9.0);
        let out = smooth(grid, 3, 1).unwrap();
        assert!((*out.get(2, 2) - 1.0).abs() < 1e-6);
        assert!((*out.get(1, 1) - 1.0).abs() < 1e-6);
        assert_eq!(*out.get(0, 0), 0.0);
    }

    #[test]
    fn test_edges_replicate() {
        // A lone spike in the corner is counted four times by the corner's window
        let mut grid = Grid::try_new_with(6, 0.0f32).unwrap();
        grid.set(0, 0, 9.0);
        let out = smooth(grid, 3, 1).unwrap();
        assert!((*out.get(0, 0) - 4.0).abs() < 1e-6, "corner {}", out.get(0, 0));
    }

    #[test]
    fn test_even_kernel_spans_its_side() {
        assert_eq!(kernel_span(4), (-2, 1));
        assert_eq!(kernel_span(5), (-2, 2));
        assert_eq!(kernel_span(2), (-1, 0));
    }

    #[test]
    fn test_even_kernel_is_not_widened() {
        // Spike at (3, 3): a 2x2 window reaches it from (3..=4, 3..=4) only
        let mut grid = Grid::try_new_with(8, 0.0f32).unwrap();
        grid.set(3, 3, 8.0);
        let out = smooth(grid, 2, 1).unwrap();
        assert_eq!(*out.get(3, 3), 2.0);
        assert_eq!(*out.get(4, 4), 2.0);
        // A symmetric 3x3 window would have spread the spike to (2, 2)
        assert_eq!(*out.get(2, 2), 0.0);
        assert_eq!(*out.get(2, 3), 0.0);
    }

    #[test]
    fn test_passes_chain() {
        let grid = noisy(12, 3);
        let two = smooth(grid.clone(), 3, 2).unwrap();
        let one_then_one = smooth(smooth(grid, 3, 1).unwrap(), 3, 1).unwrap();
        assert!(two.bit_identical(&one_then_one));
    }

    #[test]
    fn test_variance_does_not_increase() {
        let grid = noisy(32, 4);
        let mut previous = grid.variance();
        for iterations in 1..=4 {
            let v = smooth(grid.clone(), 3, iterations).unwrap().variance();
            assert!(v <= previous + 1e-9, "variance rose from {} to {} at {} passes", previous, v, iterations);
            previous = v;
        }
    }

    #[test]
    fn test_non_negative_preserved() {
        let grid = noisy(20, 5);
        let out = smooth(grid, 5, 2).unwrap();
        assert!(out.as_slice().iter().all(|&h| h >= 0.0));
    }
}
