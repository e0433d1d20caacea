//! Board representation and game-state types.
//!
//! Contains the core data structures for squares, pieces, players, moves,
//! and the overall game snapshot.

pub mod error;
pub mod mv;
pub mod piece;
pub mod player;
pub mod square;
pub mod state;

pub use error::BoardError;
pub use mv::Move;
pub use piece::{Piece, PieceKind, Seat, ALL_SEATS};
pub use player::{Player, STARTING_PIECES};
pub use square::{
    chebyshev_distance, is_safe_square, manhattan_to_center, Square, BOARD_SIZE, CENTER,
    NEUTRAL_ROOK_SQUARES, SAFE_SQUARES, SQUARE_COUNT,
};
pub use state::{Board, GameState};
