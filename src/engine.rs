//! Engine state management.
//!
//! Holds the current game, engine options and the random source, and
//! answers each protocol command by writing its response lines.

use std::collections::HashMap;
use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::board::{BoardError, Coord, Move, Preset, CORNERS, DEFAULT_SIZE, MAX_SIZE};
use crate::game::{Game, GameError};
use crate::search::{recommend_with, TieBreak};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no position set")]
    NoPosition,

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("{from} to {to} is neither a copy nor a jump")]
    Unreachable { from: Coord, to: Coord },

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Option<Game>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            game: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Starts a new game from the default preset.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.start(&CORNERS)
    }

    /// Starts a new game from the named preset.
    pub fn set_position(&mut self, preset: &str) -> Result<(), EngineError> {
        let preset =
            Preset::by_name(preset).ok_or_else(|| EngineError::UnknownPreset(preset.to_string()))?;
        self.start(preset)
    }

    fn start(&mut self, preset: &Preset<'_>) -> Result<(), EngineError> {
        let size = self.board_size();
        self.game = Some(Game::new(size, preset)?);
        info!(preset = preset.name, size, "new game");
        Ok(())
    }

    /// Sets an engine option. A non-zero `Seed` reseeds the random source
    /// immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        if name == "Seed" {
            match value.parse::<u64>() {
                Ok(0) => self.rng = SmallRng::from_entropy(),
                Ok(seed) => self.rng = SmallRng::seed_from_u64(seed),
                Err(_) => warn!(value = %value, "invalid Seed value"),
            }
        }
        self.options.insert(name, value);
    }

    /// Returns the configured tie-break policy, or the default.
    fn tie_break(&self) -> TieBreak {
        match self.options.get("TieBreak") {
            Some(v) => v.parse().unwrap_or_else(|e| {
                warn!(error = %e, "falling back to default tie-break");
                TieBreak::default()
            }),
            None => TieBreak::default(),
        }
    }

    /// Returns the configured board size for new games, or the default
    /// when the value is not a number in `1..=MAX_SIZE`.
    fn board_size(&self) -> usize {
        match self.options.get("BoardSize") {
            Some(v) => match v.parse::<usize>() {
                Ok(size) if (1..=MAX_SIZE).contains(&size) => size,
                _ => {
                    warn!(value = %v, max = MAX_SIZE, "falling back to default board size");
                    DEFAULT_SIZE
                }
            },
            None => DEFAULT_SIZE,
        }
    }

    fn game(&self) -> Result<&Game, EngineError> {
        self.game.as_ref().ok_or(EngineError::NoPosition)
    }

    /// Handles the handshake: writes id, options, protocol_version and auiok.
    pub fn handle_aui<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name assimilate")?;
        writeln!(out, "id author assimilate")?;
        writeln!(out, "option name TieBreak type combo default first var first var random")?;
        writeln!(
            out,
            "option name BoardSize type spin default {} min 1 max {}",
            DEFAULT_SIZE, MAX_SIZE
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "auiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `go`: reports the advisor's move without playing it.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> Result<(), EngineError> {
        let tie_break = self.tie_break();
        let game = self.game.as_ref().ok_or(EngineError::NoPosition)?;
        match recommend_with(game.board().grid(), game.to_move(), tie_break, &mut self.rng) {
            Some(mv) => writeln!(out, "bestmove {} score {}", mv, mv.score)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()?;
        Ok(())
    }

    /// Handles `move`: plays for the side to move and reports the outcome.
    pub fn handle_move<W: Write>(
        &mut self,
        from: Coord,
        to: Coord,
        out: &mut W,
    ) -> Result<(), EngineError> {
        let game = self.game.as_mut().ok_or(EngineError::NoPosition)?;
        let mv = Move::between(from, to).ok_or(EngineError::Unreachable { from, to })?;
        game.play(mv)?;
        writeln!(out, "result {}", game.outcome())?;
        out.flush()?;
        Ok(())
    }

    /// Handles `show`: board rows, counts and the side to move.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let game = self.game()?;
        let board = game.board();
        let counts = board.counts();
        write!(out, "{}", board)?;
        writeln!(
            out,
            "counts empty {} black {} white {}",
            counts.empty, counts.black, counts.white
        )?;
        writeln!(out, "turn {}", game.to_move().name())?;
        out.flush()?;
        Ok(())
    }

    /// Handles `judge`.
    pub fn handle_judge<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        let game = self.game()?;
        writeln!(out, "result {}", game.outcome())?;
        out.flush()?;
        Ok(())
    }
}
