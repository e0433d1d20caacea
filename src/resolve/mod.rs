//! Move resolution.
//!
//! Applies moves to game snapshots, sequences turns, detects the winner,
//! and handles the human select-then-move interaction.

pub mod apply;
pub mod select;
pub mod turn;

pub use apply::{apply_move, resolve_move, MoveEvents};
pub use select::{select_square, select_square_with_events};
pub use turn::{next_seat, surviving_seats, winner};
