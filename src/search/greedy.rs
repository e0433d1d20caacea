//! One-ply heuristic move selection.
//!
//! Walks every legal move of the seat's pieces in row-major piece order,
//! scores it with the heuristic plus a random term, and keeps the first
//! move with the strictly highest score.

use rand::Rng;

use crate::board::{GameState, Move, Seat};
use crate::eval::{score_move, NOISE_RANGE};
use crate::movegen::legal_moves;

/// A move together with the score that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f32,
}

/// Picks the best move for `seat`, drawing one noise value per candidate.
///
/// Returns `None` when the seat has no legal move.
pub fn best_move_for(
    state: &GameState,
    seat: Seat,
    mut noise: impl FnMut() -> f32,
) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for from in state.board.squares_of(seat) {
        for to in legal_moves(state, from) {
            let mv = Move::new(from, to);
            let score = noise() + score_move(state, mv);
            if best.map_or(true, |b| score > b.score) {
                best = Some(ScoredMove { mv, score });
            }
        }
    }
    best
}

/// Chooses the AI move for the seat to play.
///
/// Returns `None` when the game is over, the current seat is human, or the
/// seat has no legal move (the AI passes).
pub fn choose_ai_move(state: &GameState, rng: &mut impl Rng) -> Option<Move> {
    if !state.active || !state.current_player().is_ai {
        return None;
    }
    best_move_for(state, state.current, || rng.gen_range(0.0..NOISE_RANGE)).map(|s| s.mv)
}
