//! Move evaluation.
//!
//! Scores candidate moves for the computer-controlled seats.

pub(crate) mod heuristic;

pub use heuristic::{is_capture, score_move, CAPTURE_BONUS, CENTER_BONUS, NOISE_RANGE};
