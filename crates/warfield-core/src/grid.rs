use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, MAX_CELLS};

/// Offsets of the 8-neighbourhood, row by row.
pub const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// An owned 2D grid stored as a single row-major buffer.
/// `x` indexes columns, `y` indexes rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Clone> Grid<T> {
    /// Allocate a `width × height` grid filled with `fill`.
    ///
    /// Rejects empty or oversized dimensions before touching the allocator and
    /// reports allocation failure instead of aborting.
    pub fn new(width: usize, height: usize, fill: T) -> Result<Self> {
        let cells = checked_cell_count(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells).map_err(|_| Error::Allocation { cells })?;
        data.resize(cells, fill);
        Ok(Self { data, width, height })
    }
}

impl<T> Grid<T> {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Bounds-checked cell access.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.data.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data.get_mut(i)
        } else {
            None
        }
    }

    /// Cell at a signed coordinate, `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, x: isize, y: isize) -> Option<&T> {
        if self.in_bounds(x, y) {
            self.get(x as usize, y as usize)
        } else {
            None
        }
    }

    /// In-bounds 8-neighbours of `(x, y)`, as `(x, y, &cell)`.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        NEIGHBORS_8.iter().filter_map(move |&(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            self.get_signed(nx, ny).map(|cell| (nx as usize, ny as usize, cell))
        })
    }

    /// Number of in-bounds 8-neighbours satisfying `pred`.
    pub fn count_neighbors(&self, x: usize, y: usize, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.neighbors(x, y).filter(|(_, _, c)| pred(c)).count()
    }

    /// Number of cells satisfying `pred`.
    pub fn count(&self, pred: impl FnMut(&&T) -> bool) -> usize {
        self.data.iter().filter(pred).count()
    }

    /// Row-major iteration as `(x, y, &cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let w = self.width;
        self.data.iter().enumerate().map(move |(i, c)| (i % w, i / w, c))
    }

    pub fn cells(&self) -> &[T] {
        &self.data
    }

    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// `width * height`, validated against zero dimensions, overflow and [`MAX_CELLS`].
pub fn checked_cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    match width.checked_mul(height) {
        Some(n) if n <= MAX_CELLS => Ok(n),
        _ => Err(Error::GridTooLarge { width, height }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(Grid::new(0, 5, 0u8), Err(Error::InvalidDimensions { width: 0, height: 5 }));
        assert_eq!(Grid::new(5, 0, 0u8), Err(Error::InvalidDimensions { width: 5, height: 0 }));
    }

    #[test]
    fn rejects_oversized_grid() {
        assert_eq!(
            Grid::new(usize::MAX, 2, 0u8),
            Err(Error::GridTooLarge { width: usize::MAX, height: 2 })
        );
        assert!(matches!(Grid::new(MAX_CELLS, 2, 0u8), Err(Error::GridTooLarge { .. })));
    }

    #[test]
    fn get_is_bounds_checked() {
        let mut g = Grid::new(3, 2, 0i32).unwrap();
        *g.get_mut(2, 1).unwrap() = 7;
        assert_eq!(g.get(2, 1), Some(&7));
        assert_eq!(g.get(3, 0), None);
        assert_eq!(g.get(0, 2), None);
        assert_eq!(g.get_signed(-1, 0), None);
    }

    #[test]
    fn row_major_layout() {
        let mut g = Grid::new(4, 3, 0usize).unwrap();
        for y in 0..3 {
            for x in 0..4 {
                *g.get_mut(x, y).unwrap() = y * 10 + x;
            }
        }
        assert_eq!(g.cells()[5], 11);
        let (x, y, v) = g.iter().nth(6).unwrap();
        assert_eq!((x, y, *v), (2, 1, 12));
    }

    #[test]
    fn corner_has_three_neighbours_interior_has_eight() {
        let g = Grid::new(5, 5, 1u8).unwrap();
        assert_eq!(g.neighbors(0, 0).count(), 3);
        assert_eq!(g.neighbors(4, 2).count(), 5);
        assert_eq!(g.neighbors(2, 2).count(), 8);
        assert_eq!(g.count_neighbors(2, 2, |&v| v == 1), 8);
    }
}
