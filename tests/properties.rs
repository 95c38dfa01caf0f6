//! Property tests for the board engine and the move advisor.
//!
//! Drives boards through arbitrary move sequences and arbitrary positions and
//! checks the count invariants, assimilation idempotence, snapshot
//! independence and that the advisor's choice is a maximal legal move.

use proptest::prelude::*;
use proptest::sample::Index;

use assimilate::board::{Board, Cell, Coord, Grid, Player, ALL_CELLS, CORNERS, CROSS};
use assimilate::eval::score_move;
use assimilate::movegen::legal_moves;
use assimilate::search::{analyse, recommend};

fn player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::Black), Just(Player::White)]
}

fn cell() -> impl Strategy<Value = Cell> {
    prop::sample::select(ALL_CELLS.to_vec())
}

/// An arbitrary square grid of side 1 to 9.
fn grid() -> impl Strategy<Value = Grid> {
    (1usize..=9).prop_flat_map(|size| {
        prop::collection::vec(cell(), size * size).prop_map(move |cells| {
            let mut grid = Grid::new(size).unwrap();
            for (i, cell) in cells.into_iter().enumerate() {
                grid.set(Coord::new(i % size, i / size), cell).unwrap();
            }
            grid
        })
    })
}

/// Plays `picks` from a preset, alternating sides and skipping a side that
/// cannot move. Calls `check` after every move.
fn play_picks(board: &mut Board, picks: &[Index], mut check: impl FnMut(&Board)) {
    let mut to_move = Player::Black;
    for pick in picks {
        if board.judge_end().is_over() {
            break;
        }
        let moves = legal_moves(board.grid(), to_move);
        if !moves.is_empty() {
            let mv = moves[pick.index(moves.len())];
            board.apply(to_move, &mv).unwrap();
            check(board);
        }
        to_move = to_move.opponent();
    }
}

proptest! {
    #[test]
    fn counts_match_grid_after_any_move_sequence(
        cross in any::<bool>(),
        picks in prop::collection::vec(any::<Index>(), 0..120),
    ) {
        let preset = if cross { &CROSS } else { &CORNERS };
        let mut board = Board::with_preset(9, preset).unwrap();
        play_picks(&mut board, &picks, |b| {
            let counts = b.counts();
            assert_eq!(counts.total(), 81);
            assert_eq!(counts, b.grid().recount());
        });
    }

    #[test]
    fn assimilate_is_idempotent(
        grid in grid(),
        player in player(),
        x in any::<Index>(),
        y in any::<Index>(),
    ) {
        let size = grid.size();
        let center = Coord::new(x.index(size), y.index(size));
        let mut board = Board::from_grid(grid);
        board.assimilate(player, center).unwrap();
        let once = board.clone();
        prop_assert_eq!(board.assimilate(player, center).unwrap(), 0);
        prop_assert_eq!(&board, &once);
        prop_assert_eq!(board.counts(), board.grid().recount());
    }

    #[test]
    fn assimilate_only_touches_opponent_neighbours(
        grid in grid(),
        player in player(),
        x in any::<Index>(),
        y in any::<Index>(),
    ) {
        let size = grid.size();
        let center = Coord::new(x.index(size), y.index(size));
        let before = grid.clone();
        let mut board = Board::from_grid(grid);
        let converted = board.assimilate(player, center).unwrap();

        let mut changed = 0;
        for (c, cell) in before.iter() {
            let after = board.grid()[c];
            if after != cell {
                changed += 1;
                prop_assert!(c.distance(center) <= 1);
                prop_assert_eq!(cell, player.opponent().cell());
                prop_assert_eq!(after, player.cell());
            }
        }
        prop_assert_eq!(changed, converted);
    }

    #[test]
    fn snapshot_is_independent_of_later_moves(
        picks in prop::collection::vec(any::<Index>(), 1..40),
    ) {
        let mut board = Board::with_preset(9, &CORNERS).unwrap();
        let snapshot = board.snapshot();
        let copy = snapshot.clone();
        play_picks(&mut board, &picks, |_| {});
        prop_assert_eq!(snapshot, copy);
    }

    #[test]
    fn mutating_a_snapshot_leaves_the_board_alone(
        x in 0usize..9,
        y in 0usize..9,
        cell in cell(),
    ) {
        let board = Board::with_preset(9, &CROSS).unwrap();
        let before = board.snapshot();
        let mut snapshot = board.snapshot();
        snapshot.grid.set(Coord::new(x, y), cell).unwrap();
        snapshot.counts = snapshot.grid.recount();
        prop_assert_eq!(board.snapshot(), before);
        prop_assert_eq!(board.counts(), board.grid().recount());
    }

    #[test]
    fn recommended_move_is_a_maximal_legal_move(grid in grid(), player in player()) {
        let moves = legal_moves(&grid, player);
        let best = recommend(&grid, player);
        let analysis = analyse(&grid, player);

        prop_assert_eq!(best.is_none(), moves.is_empty());
        prop_assert_eq!(analysis.candidates, moves.len());
        if let Some(best) = best {
            let top = moves
                .iter()
                .map(|m| score_move(&grid, player, m.kind, m.to))
                .max();
            prop_assert_eq!(Some(best.score), top);
            prop_assert_eq!(analysis.best.first(), Some(&best));
            prop_assert!(analysis.best.iter().all(|m| m.score == best.score));
            prop_assert_eq!(grid[best.from], player.cell());
            prop_assert_eq!(grid[best.to], Cell::Empty);
        }
    }
}
