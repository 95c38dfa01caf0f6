//! Cell states and players.
//!
//! A cell is either empty or occupied by one of the two players. `Player`
//! is kept as its own type so that "the opponent of an empty cell" cannot
//! be expressed.

use serde::{Deserialize, Serialize};

/// The two sides. Black moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

/// Both players in turn order.
pub const ALL_PLAYERS: [Player; 2] = [Player::Black, Player::White];

impl Player {
    /// Returns the other player.
    #[inline]
    pub const fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Returns the cell state occupied by this player's pieces.
    #[inline]
    pub const fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }

    /// Returns the lowercase name used by the text protocol.
    pub const fn name(self) -> &'static str {
        match self {
            Player::Black => "black",
            Player::White => "white",
        }
    }
}

/// The state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
}

/// Every cell state, indexed by `Cell as usize`.
pub const ALL_CELLS: [Cell; 3] = [Cell::Empty, Cell::Black, Cell::White];

impl Cell {
    /// Returns the occupying player, or `None` for an empty cell.
    #[inline]
    pub const fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the character used when rendering a grid.
    pub const fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'X',
            Cell::White => 'O',
        }
    }

    /// Parses a cell from its rendering character.
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::Black),
            'O' => Some(Cell::White),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involution() {
        for p in ALL_PLAYERS {
            assert_ne!(p.opponent(), p);
            assert_eq!(p.opponent().opponent(), p);
        }
    }

    #[test]
    fn player_cell_roundtrip() {
        for p in ALL_PLAYERS {
            assert_eq!(p.cell().player(), Some(p));
        }
        assert_eq!(Cell::Empty.player(), None);
    }

    #[test]
    fn symbols_roundtrip() {
        for c in ALL_CELLS {
            assert_eq!(Cell::from_symbol(c.symbol()), Some(c));
        }
        assert_eq!(Cell::from_symbol('?'), None);
    }

    #[test]
    fn all_cells_indexed_by_discriminant() {
        for (i, c) in ALL_CELLS.iter().enumerate() {
            assert_eq!(*c as usize, i);
        }
    }
}
