//! Aggregate per-state cell counts.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Player};

/// Number of cells currently in each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Counts {
    pub empty: usize,
    pub black: usize,
    pub white: usize,
}

impl Counts {
    /// Counts for an all-empty board with `cells` cells.
    pub const fn all_empty(cells: usize) -> Counts {
        Counts {
            empty: cells,
            black: 0,
            white: 0,
        }
    }

    /// Tallies a sequence of cells.
    pub fn tally<I: IntoIterator<Item = Cell>>(cells: I) -> Counts {
        let mut counts = Counts::default();
        for cell in cells {
            *counts.slot(cell) += 1;
        }
        counts
    }

    #[inline]
    pub const fn get(&self, cell: Cell) -> usize {
        match cell {
            Cell::Empty => self.empty,
            Cell::Black => self.black,
            Cell::White => self.white,
        }
    }

    /// Pieces owned by `player`.
    #[inline]
    pub const fn of(&self, player: Player) -> usize {
        self.get(player.cell())
    }

    /// Sum over all three states.
    #[inline]
    pub const fn total(&self) -> usize {
        self.empty + self.black + self.white
    }

    /// Moves one cell's worth of count from `from` to `to`.
    ///
    /// Callers must have observed a cell in state `from`, so the decrement
    /// cannot underflow while the counts mirror the grid.
    #[inline]
    pub(crate) fn transfer(&mut self, from: Cell, to: Cell) {
        if from == to {
            return;
        }
        *self.slot(from) -= 1;
        *self.slot(to) += 1;
    }

    fn slot(&mut self, cell: Cell) -> &mut usize {
        match cell {
            Cell::Empty => &mut self.empty,
            Cell::Black => &mut self.black,
            Cell::White => &mut self.white,
        }
    }
}
