//! Human square selection.
//!
//! A human turn is two taps: one on an own piece to select it and show its
//! legal destinations, one on a highlighted destination to move. Anything
//! else either re-selects another own piece, clears the selection, or does
//! nothing.

use crate::board::{GameState, Move, Square};
use crate::movegen::legal_moves;

use super::apply::{resolve_move, MoveEvents};

/// Handles a tap on `sq` by the human seat to move.
///
/// Ignored when the game is over or the current seat is AI-controlled.
pub fn select_square(state: &GameState, sq: Square) -> GameState {
    select_square_with_events(state, sq).0
}

/// Like `select_square`, also reporting the move when the tap completes one.
pub fn select_square_with_events(state: &GameState, sq: Square) -> (GameState, Option<MoveEvents>) {
    if !state.active || state.current_player().is_ai {
        return (state.clone(), None);
    }

    let own_piece = state
        .board
        .get(sq)
        .is_some_and(|p| p.is_owned_by(state.current));

    if let Some(from) = state.selected {
        if state.highlights.contains(&sq) {
            return match resolve_move(state, Move::new(from, sq)) {
                Some((next, events)) => (next, Some(events)),
                None => (state.clone(), None),
            };
        }
        let mut next = state.clone();
        if own_piece {
            next.selected = Some(sq);
            next.highlights = legal_moves(state, sq);
        } else {
            next.selected = None;
            next.highlights.clear();
        }
        return (next, None);
    }

    if !own_piece {
        return (state.clone(), None);
    }
    let mut next = state.clone();
    next.selected = Some(sq);
    next.highlights = legal_moves(state, sq);
    (next, None)
}
