//! Turn-taking game driver.
//!
//! Wraps a `Board` with the side to move, a ply counter and the move
//! history. Unlike the board primitives, `Game::play` checks that the
//! origin belongs to the mover and that the destination is at copy or
//! jump distance.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, BoardError, Move, MoveKind, Outcome, Player, Preset};
use crate::movegen::has_legal_move;
use crate::search::{recommend_with, TieBreak};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("game is over ({0})")]
    Finished(Outcome),

    #[error("{} {} is out of reach for a {} move", .0.from, .0.to, .0.kind.name())]
    OutOfReach(Move),

    #[error("{} still has a move and cannot pass", .0.name())]
    CannotPass(Player),
}

/// One entry of the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub ply: usize,
    pub player: Player,
    /// `None` for a pass.
    pub mv: Option<Move>,
    /// Opponent pieces converted by the move.
    pub converted: usize,
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<Turn>,
    outcome: Outcome,
}

impl Game {
    /// Starts a game from `preset` on a `size`×`size` board, Black to move.
    pub fn new(size: usize, preset: &Preset<'_>) -> Result<Game, BoardError> {
        Ok(Game::from_board(Board::with_preset(size, preset)?, Player::Black))
    }

    /// Continues from an arbitrary position.
    pub fn from_board(board: Board, to_move: Player) -> Game {
        let outcome = board.judge_end();
        Game {
            board,
            to_move,
            history: Vec::new(),
            outcome,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Number of turns taken, passes included.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Plays `mv` for the side to move, then judges and hands over the turn.
    pub fn play(&mut self, mv: Move) -> Result<Turn, GameError> {
        self.ensure_ongoing()?;
        let player = self.to_move;
        if self.board.get(mv.from) != Some(player.cell()) {
            self.board.grid().check(mv.from)?;
            return Err(BoardError::NotOwned {
                origin: mv.from,
                player,
            }
            .into());
        }
        if MoveKind::for_distance(mv.from.distance(mv.to)) != Some(mv.kind) {
            return Err(GameError::OutOfReach(mv));
        }

        let converted = self.board.apply(player, &mv)?;
        let turn = Turn {
            ply: self.ply(),
            player,
            mv: Some(mv),
            converted,
        };
        debug!(ply = turn.ply, player = player.name(), mv = %mv, converted, "move played");
        self.finish_turn(turn);
        Ok(turn)
    }

    /// Hands the turn over without moving. Only allowed when the side to
    /// move has nothing to play.
    pub fn pass(&mut self) -> Result<Turn, GameError> {
        self.ensure_ongoing()?;
        let player = self.to_move;
        if has_legal_move(self.board.grid(), player) {
            return Err(GameError::CannotPass(player));
        }
        let turn = Turn {
            ply: self.ply(),
            player,
            mv: None,
            converted: 0,
        };
        debug!(ply = turn.ply, player = player.name(), "pass");
        self.finish_turn(turn);
        Ok(turn)
    }

    /// Asks the advisor for the side to move and plays its choice, passing
    /// if it finds nothing.
    pub fn step(&mut self, tie_break: TieBreak, rng: &mut impl Rng) -> Result<Turn, GameError> {
        self.ensure_ongoing()?;
        match recommend_with(self.board.grid(), self.to_move, tie_break, rng) {
            Some(mv) => self.play(mv),
            None => self.pass(),
        }
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.outcome.is_over() {
            Err(GameError::Finished(self.outcome))
        } else {
            Ok(())
        }
    }

    fn finish_turn(&mut self, turn: Turn) {
        self.history.push(turn);
        self.outcome = self.board.judge_end();
        self.to_move = self.to_move.opponent();
    }
}
