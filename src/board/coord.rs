//! Grid coordinates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A (column, row) position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Coord {
        Coord { x, y }
    }

    /// Chebyshev (king-move) distance between two coordinates.
    #[inline]
    pub fn distance(self, other: Coord) -> usize {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Error returned when parsing an `x,y` coordinate fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate '{0}': expected 'x,y'")]
pub struct ParseCoordError(pub String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Coord, ParseCoordError> {
        let err = || ParseCoordError(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse::<usize>().map_err(|_| err())?;
        let y = y.trim().parse::<usize>().map_err(|_| err())?;
        Ok(Coord { x, y })
    }
}
