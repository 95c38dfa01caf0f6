//! The board engine.
//!
//! `Board` owns the grid and its aggregate counts. Every write goes through
//! `Board::put`, which updates both in one step, so the counts always equal
//! a fresh tally of the grid. Callers read through `grid()` or take an owned
//! `snapshot()`; there is no other path to the cells.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::cell::{Cell, Player, ALL_PLAYERS};
use super::coord::Coord;
use super::counts::Counts;
use super::error::BoardError;
use super::grid::{Grid, DEFAULT_SIZE};
use super::moves::{Move, MoveKind, COPY_RANGE, JUMP_RANGE};
use super::outcome::Outcome;
use super::preset::Preset;

/// An owned copy of the grid and counts, independent of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub counts: Counts,
}

/// Grid plus cached per-state counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    counts: Counts,
}

impl Board {
    /// Creates an empty `size`×`size` board.
    pub fn new(size: usize) -> Result<Board, BoardError> {
        let grid = Grid::new(size)?;
        Ok(Board {
            grid,
            counts: Counts::all_empty(size * size),
        })
    }

    /// Creates a board and places `preset` on it.
    pub fn with_preset(size: usize, preset: &Preset<'_>) -> Result<Board, BoardError> {
        let mut board = Board::new(size)?;
        board.initialize(preset)?;
        Ok(board)
    }

    /// Adopts an arbitrary grid, deriving the counts from it.
    pub fn from_grid(grid: Grid) -> Board {
        let counts = grid.recount();
        Board { grid, counts }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// Read-only view of the cells.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Cell> {
        self.grid.get(c)
    }

    /// Clears the board and places a preset.
    ///
    /// All coordinates are validated first; on error the board is unchanged.
    pub fn initialize(&mut self, preset: &Preset<'_>) -> Result<(), BoardError> {
        let mut seen = HashSet::new();
        for player in ALL_PLAYERS {
            for &c in preset.placements(player) {
                self.grid.check(c)?;
                if !seen.insert(c) {
                    return Err(BoardError::DuplicatePlacement(c));
                }
            }
        }

        let size = self.size();
        self.grid = Grid::new(size)?;
        self.counts = Counts::all_empty(size * size);
        for player in ALL_PLAYERS {
            for &c in preset.placements(player) {
                self.put(c, player.cell());
            }
        }
        Ok(())
    }

    /// Places a new `player` piece at `to` and assimilates around it.
    ///
    /// The distance from any origin is not checked here. Returns the number
    /// of opponent pieces converted.
    pub fn copy_move(&mut self, player: Player, to: Coord) -> Result<usize, BoardError> {
        self.grid.check(to)?;
        if !self.grid[to].is_empty() {
            return Err(BoardError::Occupied(to));
        }
        self.put(to, player.cell());
        Ok(self.spread(player, to))
    }

    /// Moves the `player` piece at `from` to `to` and assimilates around `to`.
    ///
    /// Returns the number of opponent pieces converted.
    pub fn jump_move(&mut self, player: Player, from: Coord, to: Coord) -> Result<usize, BoardError> {
        self.grid.check(from)?;
        self.grid.check(to)?;
        if self.grid[from] != player.cell() {
            return Err(BoardError::NotOwned { origin: from, player });
        }
        if !self.grid[to].is_empty() {
            return Err(BoardError::Occupied(to));
        }
        self.put(from, Cell::Empty);
        self.put(to, player.cell());
        Ok(self.spread(player, to))
    }

    /// Applies a move descriptor for `player`, dispatching on its kind.
    pub fn apply(&mut self, player: Player, mv: &Move) -> Result<usize, BoardError> {
        match mv.kind {
            MoveKind::Copy => self.copy_move(player, mv.to),
            MoveKind::Jump => self.jump_move(player, mv.from, mv.to),
        }
    }

    /// Converts every opponent piece adjacent to `center` (8-neighbourhood,
    /// clipped) to `player`. Empty cells and `player`'s own cells are left
    /// alone, so repeating the call changes nothing.
    pub fn assimilate(&mut self, player: Player, center: Coord) -> Result<usize, BoardError> {
        self.grid.check(center)?;
        Ok(self.spread(player, center))
    }

    /// Decides whether the game is over.
    ///
    /// In order: a full board goes to the player with more pieces (equal
    /// counts are a draw); a player with no pieces loses; a player with no
    /// empty cell within jump range of any of their pieces loses, Black
    /// being checked first.
    pub fn judge_end(&self) -> Outcome {
        let counts = self.counts;
        if counts.empty == 0 {
            return match counts.black.cmp(&counts.white) {
                std::cmp::Ordering::Greater => Outcome::Win(Player::Black),
                std::cmp::Ordering::Less => Outcome::Win(Player::White),
                std::cmp::Ordering::Equal => Outcome::Draw,
            };
        }
        if counts.black == 0 {
            return Outcome::Win(Player::White);
        }
        if counts.white == 0 {
            return Outcome::Win(Player::Black);
        }

        let [black_live, white_live] = self.liveness();
        if !black_live {
            Outcome::Win(Player::White)
        } else if !white_live {
            Outcome::Win(Player::Black)
        } else {
            Outcome::Ongoing
        }
    }

    /// Whether `player` has an empty cell within jump range of one of their pieces.
    pub fn is_live(&self, player: Player) -> bool {
        self.liveness()[player as usize]
    }

    /// Returns an owned copy of the grid and counts.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            counts: self.counts,
        }
    }

    /// Per-player liveness, indexed by `Player as usize`.
    fn liveness(&self) -> [bool; 2] {
        let mut live = [false; 2];
        for (c, cell) in self.grid.iter() {
            if !cell.is_empty() {
                continue;
            }
            for player in ALL_PLAYERS {
                if live[player as usize] {
                    continue;
                }
                let target = player.cell();
                if self.grid.window(c, JUMP_RANGE).any(|n| self.grid[n] == target) {
                    live[player as usize] = true;
                }
            }
            if live[0] && live[1] {
                break;
            }
        }
        live
    }

    /// The single write path: updates the cell and shifts the counts.
    #[inline]
    fn put(&mut self, c: Coord, cell: Cell) {
        let prev = self.grid.replace(c, cell);
        self.counts.transfer(prev, cell);
    }

    fn spread(&mut self, player: Player, center: Coord) -> usize {
        let own = player.cell();
        let mut converted = 0;
        for c in self.grid.window(center, COPY_RANGE) {
            let cell = self.grid[c];
            if cell.is_empty() || cell == own {
                continue;
            }
            self.put(c, own);
            converted += 1;
        }
        converted
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::from_grid(Grid::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}
