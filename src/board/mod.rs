//! Board representation and game-state types.
//!
//! Contains the cell and player types, coordinates, the grid, starting
//! presets, move descriptors, and the `Board` engine that applies moves
//! and judges the end of the game.

pub mod cell;
pub mod coord;
pub mod counts;
pub mod error;
pub mod grid;
pub mod moves;
pub mod outcome;
pub mod preset;
pub mod state;

pub use cell::{Cell, Player, ALL_CELLS, ALL_PLAYERS};
pub use coord::{Coord, ParseCoordError};
pub use counts::Counts;
pub use error::BoardError;
pub use grid::{Grid, DEFAULT_SIZE, MAX_SIZE};
pub use moves::{Move, MoveKind, COPY_RANGE, JUMP_RANGE};
pub use outcome::Outcome;
pub use preset::{Preset, CORNERS, CROSS, PRESETS};
pub use state::{Board, Snapshot};
