//! Text and JSON rendering of engine output.
//!
//! Squares are written as `row,col`; full game snapshots are JSON objects
//! carrying the board, every player's stats, the seat to move, the human
//! selection and its highlights, and the outcome.

use serde::Serialize;

use crate::board::{GameState, Move, Square};

/// A game snapshot tagged with the session it belongs to.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub session: u64,
    #[serde(flatten)]
    pub state: &'a GameState,
}

/// Encodes the snapshot as a single-line JSON object.
pub fn encode_snapshot(session: u64, state: &GameState) -> serde_json::Result<String> {
    serde_json::to_string(&Snapshot { session, state })
}

/// Formats a square as `row,col`.
pub fn format_square(sq: Square) -> String {
    format!("{},{}", sq.row(), sq.col())
}

/// Formats a list of squares separated by spaces.
pub fn format_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|s| format_square(*s))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a move as `r1 c1 r2 c2`, the same shape `move` accepts.
pub fn format_move(mv: Move) -> String {
    format!(
        "{} {} {} {}",
        mv.from.row(),
        mv.from.col(),
        mv.to.row(),
        mv.to.col()
    )
}
