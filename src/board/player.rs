//! Per-player bookkeeping.

use serde::Serialize;

use super::piece::Seat;

/// Pieces every participating player starts with.
pub const STARTING_PIECES: u8 = 3;

/// Statistics and control flags for one seat.
///
/// `eliminated` is true exactly when `pieces` has dropped to zero.
/// `active` is fixed at game start by the configured player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Player {
    pub seat: Seat,
    pub pieces: u8,
    pub captures: u32,
    pub upgrades: u32,
    pub eliminated: bool,
    pub is_ai: bool,
    pub active: bool,
}

impl Player {
    /// A fresh player record. Seat one is human, the others AI.
    pub fn new(seat: Seat, active: bool) -> Self {
        Player {
            seat,
            pieces: STARTING_PIECES,
            captures: 0,
            upgrades: 0,
            eliminated: false,
            is_ai: seat != Seat::One,
            active,
        }
    }

    /// Returns true if the seat still takes turns.
    #[inline]
    pub fn in_play(&self) -> bool {
        self.active && !self.eliminated
    }

    /// Removes one piece, flagging elimination when none are left.
    pub fn lose_piece(&mut self) {
        self.pieces = self.pieces.saturating_sub(1);
        if self.pieces == 0 {
            self.eliminated = true;
        }
    }
}
