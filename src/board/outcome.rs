//! Game end judgment result.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::cell::Player;

/// Result of judging a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The game continues.
    Ongoing,
    Win(Player),
    /// Full board with equal piece counts.
    Draw,
}

impl Outcome {
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    #[inline]
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(p) => Some(p),
            _ => None,
        }
    }

    /// Protocol name: `ongoing`, `black`, `white` or `draw`.
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Ongoing => "ongoing",
            Outcome::Win(p) => p.name(),
            Outcome::Draw => "draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
