//! Move descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coord;

/// Distance at which a move duplicates the moving piece.
pub const COPY_RANGE: usize = 1;
/// Distance at which a move relocates the moving piece.
pub const JUMP_RANGE: usize = 2;

/// Whether a move adds a piece or relocates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Place a new piece next to the origin; the origin stays occupied.
    Copy,
    /// Move the origin piece two cells away; the origin becomes empty.
    Jump,
}

impl MoveKind {
    /// Classifies a Chebyshev distance between origin and destination.
    pub const fn for_distance(distance: usize) -> Option<MoveKind> {
        match distance {
            COPY_RANGE => Some(MoveKind::Copy),
            JUMP_RANGE => Some(MoveKind::Jump),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MoveKind::Copy => "copy",
            MoveKind::Jump => "jump",
        }
    }
}

/// A proposed move with its heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
    pub score: i32,
}

impl Move {
    /// An unscored copy move.
    pub const fn copy(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            kind: MoveKind::Copy,
            score: 0,
        }
    }

    /// An unscored jump move.
    pub const fn jump(from: Coord, to: Coord) -> Move {
        Move {
            from,
            to,
            kind: MoveKind::Jump,
            score: 0,
        }
    }

    /// Builds an unscored move, inferring the kind from the distance.
    pub fn between(from: Coord, to: Coord) -> Option<Move> {
        MoveKind::for_distance(from.distance(to)).map(|kind| Move {
            from,
            to,
            kind,
            score: 0,
        })
    }

    pub const fn with_score(self, score: i32) -> Move {
        Move { score, ..self }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind.name(), self.from, self.to)
    }
}
