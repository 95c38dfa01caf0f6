//! Greedy one-ply move advisor.
//!
//! Scores every reachable empty cell for every piece of the moving player
//! and keeps the best. The scan order is fixed (origins row-major, copy
//! destinations before jump destinations, each row-major), which makes
//! "first found" well defined for tie-breaking.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::board::{Grid, Move, Player};
use crate::eval::score_move;
use crate::movegen::{pieces, reach};

/// How to choose among equally scored best moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Keep the first best move in scan order.
    #[default]
    First,
    /// Pick uniformly among all tied best moves.
    Random,
}

impl TieBreak {
    pub const fn name(self) -> &'static str {
        match self {
            TieBreak::First => "first",
            TieBreak::Random => "random",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tie-break policy '{0}': expected 'first' or 'random'")]
pub struct ParseTieBreakError(pub String);

impl FromStr for TieBreak {
    type Err = ParseTieBreakError;

    fn from_str(s: &str) -> Result<TieBreak, ParseTieBreakError> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(TieBreak::First),
            "random" => Ok(TieBreak::Random),
            _ => Err(ParseTieBreakError(s.to_string())),
        }
    }
}

/// Every move tied at the best score, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub best: Vec<Move>,
    /// Best score, or `None` when the player has no move.
    pub score: Option<i32>,
    /// Number of candidates scored.
    pub candidates: usize,
}

/// Calls `visit` with every scored candidate move in scan order.
fn scan(grid: &Grid, player: Player, mut visit: impl FnMut(Move)) {
    for origin in pieces(grid, player) {
        let r = reach(grid, origin);
        for to in r.copy {
            let mv = Move::copy(origin, to);
            visit(mv.with_score(score_move(grid, player, mv.kind, to)));
        }
        for to in r.jump {
            let mv = Move::jump(origin, to);
            visit(mv.with_score(score_move(grid, player, mv.kind, to)));
        }
    }
}

/// Returns the highest-scoring move for `player`, keeping the first one
/// found on ties. `None` if the player owns no pieces or none can move.
pub fn recommend(grid: &Grid, player: Player) -> Option<Move> {
    let mut best: Option<Move> = None;
    scan(grid, player, |mv| {
        if best.map_or(true, |b| mv.score > b.score) {
            best = Some(mv);
        }
    });
    best
}

/// Collects every move tied at the best score.
pub fn analyse(grid: &Grid, player: Player) -> Analysis {
    let mut analysis = Analysis::default();
    scan(grid, player, |mv| {
        analysis.candidates += 1;
        match analysis.score {
            Some(s) if mv.score < s => {}
            Some(s) if mv.score == s => analysis.best.push(mv),
            _ => {
                analysis.score = Some(mv.score);
                analysis.best.clear();
                analysis.best.push(mv);
            }
        }
    });
    analysis
}

/// Returns a best move, resolving ties according to `tie_break`.
pub fn recommend_with(
    grid: &Grid,
    player: Player,
    tie_break: TieBreak,
    rng: &mut impl Rng,
) -> Option<Move> {
    match tie_break {
        TieBreak::First => recommend(grid, player),
        TieBreak::Random => {
            let analysis = analyse(grid, player);
            if analysis.best.is_empty() {
                return None;
            }
            let idx = rng.gen_range(0..analysis.best.len());
            Some(analysis.best[idx])
        }
    }
}
