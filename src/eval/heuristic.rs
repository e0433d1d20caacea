//! Heuristic move scoring.
//!
//! Scores a candidate move for the AI from three terms: a large bonus for
//! reaching the center square, a bonus for taking an opposing piece, and a
//! penalty of one point per step of Manhattan distance from the center.
//! A random term in `[0, NOISE_RANGE)` is added by the caller so that equal
//! moves are not always played the same way.

use crate::board::{manhattan_to_center, GameState, Move, CENTER};

/// Bonus for landing on the promotion square.
pub const CENTER_BONUS: f32 = 100.0;

/// Bonus for capturing a player's piece.
pub const CAPTURE_BONUS: f32 = 50.0;

/// Upper bound (exclusive) of the random term.
pub const NOISE_RANGE: f32 = 10.0;

/// Returns true if `mv` lands on a piece owned by a player.
#[inline]
pub fn is_capture(state: &GameState, mv: Move) -> bool {
    state
        .board
        .get(mv.to)
        .is_some_and(|target| target.owner.is_some())
}

/// Scores `mv` without the random term.
pub fn score_move(state: &GameState, mv: Move) -> f32 {
    let mut score = 0.0;
    if mv.to == CENTER {
        score += CENTER_BONUS;
    }
    if is_capture(state, mv) {
        score += CAPTURE_BONUS;
    }
    score - manhattan_to_center(mv.to) as f32
}
