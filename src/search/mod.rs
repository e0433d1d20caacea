//! AI move selection.
//!
//! Picks moves for computer-controlled seats with a one-ply greedy search
//! over the heuristic in `eval`.

pub mod greedy;

pub use greedy::{best_move_for, choose_ai_move, ScoredMove};
