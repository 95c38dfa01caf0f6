//! Board engine errors.

use super::cell::Player;
use super::coord::Coord;

/// Rejected board operations. Every variant is a caller bug: the board is
/// left unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board size must be between 1 and 64, got {0}")]
    InvalidSize(usize),

    #[error("coordinate {coord} is outside a {size}x{size} board")]
    InvalidCoordinate { coord: Coord, size: usize },

    #[error("destination {0} is not empty")]
    Occupied(Coord),

    #[error("origin {origin} does not hold a {} piece", player.name())]
    NotOwned { origin: Coord, player: Player },

    #[error("preset places more than one piece at {0}")]
    DuplicatePlacement(Coord),

    #[error("row {0} has the wrong length or an unknown symbol")]
    InvalidRow(usize),
}
