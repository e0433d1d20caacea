//! Errors raised for malformed calls into the rules engine.

/// Invalid arguments passed to the board layer from outside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("square ({row}, {col}) is off the 9x9 board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("player count must be 2, 3 or 4, got {0}")]
    InvalidPlayerCount(u8),

    #[error("player id must be 1 to 4, got {0}")]
    InvalidSeat(u8),
}
