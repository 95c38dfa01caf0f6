//! Assimilate engine library.
//!
//! Exposes the board engine, move generation, the greedy move advisor, the
//! turn-taking game driver and the protocol modules for use by integration
//! tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;
