//! Move selection.
//!
//! The advisor is a one-ply greedy search over copy and jump destinations,
//! scored by the assimilation-yield heuristic.

pub mod greedy;

pub use greedy::{analyse, recommend, recommend_with, Analysis, ParseTieBreakError, TieBreak};
