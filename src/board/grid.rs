//! Square cell matrix.
//!
//! Cells are stored row-major in a flat `Vec`, indexed by `y * size + x`.
//! A standalone `Grid` can be written freely; the `Board` wraps one privately
//! and keeps its counts in step with every write.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

use super::cell::Cell;
use super::coord::Coord;
use super::counts::Counts;
use super::error::BoardError;

/// Side length used when no size is given.
pub const DEFAULT_SIZE: usize = 9;
/// Largest accepted side length.
pub const MAX_SIZE: usize = 64;

/// A square matrix of cell states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty `size`×`size` grid. `size` must lie in
    /// `1..=MAX_SIZE`.
    pub fn new(size: usize) -> Result<Grid, BoardError> {
        if !(1..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Grid {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Builds a grid from rendered rows (`.`, `X`, `O`), row 0 first.
    ///
    /// Whitespace inside a row is ignored, so both `"X.O"` and `"X . O"`
    /// are accepted. Every row must have exactly as many cells as there
    /// are rows.
    pub fn from_rows(rows: &[&str]) -> Result<Grid, BoardError> {
        let mut grid = Grid::new(rows.len())?;
        for (y, row) in rows.iter().enumerate() {
            let cells: Vec<Cell> = row
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(Cell::from_symbol)
                .collect::<Option<_>>()
                .ok_or(BoardError::InvalidRow(y))?;
            if cells.len() != grid.size {
                return Err(BoardError::InvalidRow(y));
            }
            for (x, cell) in cells.into_iter().enumerate() {
                grid.cells[y * grid.size + x] = cell;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        c.x < self.size && c.y < self.size
    }

    /// Returns `InvalidCoordinate` unless `c` lies on the grid.
    #[inline]
    pub fn check(&self, c: Coord) -> Result<(), BoardError> {
        if self.contains(c) {
            Ok(())
        } else {
            Err(BoardError::InvalidCoordinate {
                coord: c,
                size: self.size,
            })
        }
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Cell> {
        if self.contains(c) {
            Some(self.cells[c.y * self.size + c.x])
        } else {
            None
        }
    }

    /// Writes a cell and returns its previous state.
    pub fn set(&mut self, c: Coord, cell: Cell) -> Result<Cell, BoardError> {
        self.check(c)?;
        let slot = &mut self.cells[c.y * self.size + c.x];
        Ok(std::mem::replace(slot, cell))
    }

    /// Writes a cell the caller has already bounds-checked.
    #[inline]
    pub(super) fn replace(&mut self, c: Coord, cell: Cell) -> Cell {
        debug_assert!(self.contains(c));
        let idx = c.y * self.size + c.x;
        std::mem::replace(&mut self.cells[idx], cell)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Coord::new(x, y)))
    }

    /// All `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.coords().map(move |c| (c, self[c]))
    }

    /// Coordinates within Chebyshev distance `radius` of `center`, clipped
    /// to the grid, in row-major order. Includes `center` itself.
    pub fn window(&self, center: Coord, radius: usize) -> impl Iterator<Item = Coord> {
        let last = self.size - 1;
        let x0 = center.x.saturating_sub(radius);
        let x1 = center.x.saturating_add(radius).min(last);
        let y0 = center.y.saturating_sub(radius);
        let y1 = center.y.saturating_add(radius).min(last);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| Coord::new(x, y)))
    }

    /// Number of cells in state `cell` within `radius` of `center`.
    pub fn count_around(&self, center: Coord, radius: usize, cell: Cell) -> usize {
        self.window(center, radius)
            .filter(|&c| self[c] == cell)
            .count()
    }

    /// Brute-force tally of every cell.
    pub fn recount(&self) -> Counts {
        Counts::tally(self.cells.iter().copied())
    }

    /// Row `y` as a slice.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.size..(y + 1) * self.size]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            size: DEFAULT_SIZE,
            cells: vec![Cell::Empty; DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

impl Index<Coord> for Grid {
    type Output = Cell;

    #[inline]
    fn index(&self, c: Coord) -> &Cell {
        assert!(self.contains(c), "coordinate {} outside {}x{} grid", c, self.size, self.size);
        &self.cells[c.y * self.size + c.x]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for (x, cell) in self.row(y).iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
