use crate::error::{Result, TerrainError};

/// A square 2D grid stored row-major (`y * size + x`).
///
/// Unlike a world map this grid does not wrap: reads past an edge either
/// fail (`get_checked`) or replicate the border cell (`get_clamped`).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub size: usize,
    data: Vec<T>,
}

/// Normalized terrain heights, roughly in [0, 1] before world scaling.
pub type HeightGrid = Grid<f32>;

impl<T: Clone> Grid<T> {
    /// Allocate a `size x size` grid filled with `value`.
    ///
    /// Allocation failure is reported instead of aborting, so pathological
    /// sizes surface as `GridTooLarge`.
    pub fn try_new_with(size: usize, value: T) -> Result<Self> {
        let cells = size
            .checked_mul(size)
            .ok_or(TerrainError::GridTooLarge { size })?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|_| TerrainError::GridTooLarge { size })?;
        data.resize(cells, value);
        Ok(Self { size, data })
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[y * self.size + x]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        &mut self.data[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        self.data[y * self.size + x] = value;
    }

    /// Signed lookup; `None` outside the grid.
    pub fn get_checked(&self, x: i64, y: i64) -> Option<&T> {
        if x < 0 || y < 0 || x >= self.size as i64 || y >= self.size as i64 {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    /// Signed lookup with edge replication.
    pub fn get_clamped(&self, x: i64, y: i64) -> &T {
        let max = self.size as i64 - 1;
        self.get(x.clamp(0, max) as usize, y.clamp(0, max) as usize)
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let size = self.size;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, val)| (idx % size, idx / size, val))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl Grid<f32> {
    /// Minimum and maximum cell values.
    pub fn min_max(&self) -> (f32, f32) {
        let mut min_h = f32::MAX;
        let mut max_h = f32::MIN;
        for &h in &self.data {
            if h < min_h { min_h = h; }
            if h > max_h { max_h = h; }
        }
        (min_h, max_h)
    }

    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().map(|&h| h as f64).sum::<f64>() / self.data.len() as f64
    }

    /// Population variance of all cells.
    pub fn variance(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        self.data
            .iter()
            .map(|&h| {
                let d = h as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / self.data.len() as f64
    }

    /// Copy of the grid multiplied by `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            size: self.size,
            data: self.data.iter().map(|&h| h * scale).collect(),
        }
    }

    /// True when both grids hold exactly the same bit patterns.
    pub fn bit_identical(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let mut grid = Grid::try_new_with(4, 0.0f32).unwrap();
        grid.set(3, 1, 7.0);
        assert_eq!(grid.as_slice()[1 * 4 + 3], 7.0);
        assert_eq!(*grid.get(3, 1), 7.0);
    }

    #[test]
    fn test_clamped_reads_replicate_edges() {
        let mut grid = Grid::try_new_with(3, 0.0f32).unwrap();
        grid.set(0, 0, 1.0);
        grid.set(2, 2, 9.0);
        assert_eq!(*grid.get_clamped(-5, -1), 1.0);
        assert_eq!(*grid.get_clamped(10, 3), 9.0);
    }

    #[test]
    fn test_checked_reads_reject_outside() {
        let grid = Grid::try_new_with(3, 1.0f32).unwrap();
        assert!(grid.get_checked(-1, 0).is_none());
        assert!(grid.get_checked(0, 3).is_none());
        assert_eq!(grid.get_checked(2, 2), Some(&1.0));
    }

    #[test]
    fn test_overflowing_size_is_an_error() {
        let result = Grid::try_new_with(usize::MAX, 0u8);
        assert!(matches!(result, Err(TerrainError::GridTooLarge { .. })));
    }

    #[test]
    fn test_variance_of_constant_grid_is_zero() {
        let grid = Grid::try_new_with(5, 0.25f32).unwrap();
        assert!(grid.variance().abs() < 1e-12);
        assert!((grid.mean() - 0.25).abs() < 1e-6);
    }
}
