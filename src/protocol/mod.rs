//! AUI protocol handling.
//!
//! A line-based text protocol for driving the engine: presets select the
//! position, moves are written as `x,y` coordinate pairs.

pub mod parser;

pub use parser::{parse_command, Command};
