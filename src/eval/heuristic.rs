//! Heuristic move and position scoring.
//!
//! The move score approximates how much a destination is worth by counting
//! opponent pieces in the 5×5 window around it. Assimilation itself only
//! reaches the 3×3 window, so this is a lookahead proxy rather than the
//! exact number of pieces a move would convert.

use crate::board::{Coord, Counts, Grid, MoveKind, Player, JUMP_RANGE};

/// Multiplier applied to the yield of every candidate.
pub const YIELD_WEIGHT: i32 = 2;
/// Extra score for a copy move, which adds a piece without vacating one.
pub const COPY_BONUS: i32 = 1;

/// Opponent pieces within jump range of `at`.
pub fn assimilation_yield(grid: &Grid, at: Coord, player: Player) -> usize {
    grid.count_around(at, JUMP_RANGE, player.opponent().cell())
}

/// Scores a move of the given kind landing on `to`.
///
/// Copy: `2 * yield + 1`. Jump: `2 * yield`.
pub fn score_move(grid: &Grid, player: Player, kind: MoveKind, to: Coord) -> i32 {
    let base = assimilation_yield(grid, to, player) as i32 * YIELD_WEIGHT;
    match kind {
        MoveKind::Copy => base + COPY_BONUS,
        MoveKind::Jump => base,
    }
}

/// Piece balance from `player`'s perspective, in `[-1.0, 1.0]`.
///
/// Returns 0.0 when the board holds no pieces.
pub fn evaluate(counts: &Counts, player: Player) -> f32 {
    let own = counts.of(player) as f32;
    let theirs = counts.of(player.opponent()) as f32;
    let total = own + theirs;
    if total == 0.0 {
        return 0.0;
    }
    (own - theirs) / total
}
