//! Move generation.
//!
//! Enumerates the empty cells a piece can reach: distance one for a copy,
//! distance two for a jump. Destinations are visited in row-major order
//! around each origin, origins in row-major order over the grid.

use rand::Rng;

use crate::board::{Coord, Grid, Move, MoveKind, Player, JUMP_RANGE};

/// Empty cells reachable from one origin, split by move kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reach {
    pub copy: Vec<Coord>,
    pub jump: Vec<Coord>,
}

impl Reach {
    pub fn is_empty(&self) -> bool {
        self.copy.is_empty() && self.jump.is_empty()
    }

    pub fn len(&self) -> usize {
        self.copy.len() + self.jump.len()
    }
}

/// Splits the empty cells in the 5×5 window around `origin` (clipped,
/// origin excluded) into copy and jump destinations.
pub fn reach(grid: &Grid, origin: Coord) -> Reach {
    let mut reach = Reach::default();
    for c in grid.window(origin, JUMP_RANGE) {
        if c == origin || !grid[c].is_empty() {
            continue;
        }
        match MoveKind::for_distance(origin.distance(c)) {
            Some(MoveKind::Copy) => reach.copy.push(c),
            Some(MoveKind::Jump) => reach.jump.push(c),
            None => {}
        }
    }
    reach
}

/// Coordinates holding `player`'s pieces, row-major.
pub fn pieces(grid: &Grid, player: Player) -> impl Iterator<Item = Coord> + '_ {
    let own = player.cell();
    grid.iter().filter(move |&(_, cell)| cell == own).map(|(c, _)| c)
}

/// Every unscored move available to `player`.
///
/// For each origin, copy moves come before jump moves.
pub fn legal_moves(grid: &Grid, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for origin in pieces(grid, player) {
        let r = reach(grid, origin);
        moves.extend(r.copy.into_iter().map(|to| Move::copy(origin, to)));
        moves.extend(r.jump.into_iter().map(|to| Move::jump(origin, to)));
    }
    moves
}

/// Whether `player` has at least one move.
pub fn has_legal_move(grid: &Grid, player: Player) -> bool {
    pieces(grid, player).any(|origin| {
        grid.window(origin, JUMP_RANGE)
            .any(|c| grid[c].is_empty())
    })
}

/// Picks a uniformly random legal move, or `None` if there is none.
pub fn random_move(grid: &Grid, player: Player, rng: &mut impl Rng) -> Option<Move> {
    let moves = legal_moves(grid, player);
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}
