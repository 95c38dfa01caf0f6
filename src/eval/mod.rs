//! Move and position evaluation.
//!
//! Scores candidate destinations by their assimilation yield and gives a
//! simple piece-balance value for whole positions.

pub mod heuristic;

pub use heuristic::{assimilation_yield, evaluate, score_move, COPY_BONUS, YIELD_WEIGHT};
