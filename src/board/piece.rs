//! Piece types and ownership.
//!
//! Players occupy one of four seats in a fixed cyclic turn order. A piece
//! with no owning seat is neutral: the four rooks guarding the center.

use serde::Serialize;

use super::error::BoardError;

/// The type of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Queen,
    Rook,
}

impl PieceKind {
    /// Returns true if the piece moves one step in any of the 8 directions.
    pub const fn steps(self) -> bool {
        matches!(self, PieceKind::Pawn | PieceKind::Queen)
    }

    /// Returns true if the piece makes length-2 and knight-style leaps.
    pub const fn leaps(self) -> bool {
        matches!(self, PieceKind::Knight | PieceKind::Queen)
    }

    /// Lowercase name used in protocol output.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Queen => "queen",
            PieceKind::Rook => "rook",
        }
    }
}

/// A player seat, numbered 1 to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Seat {
    One,
    Two,
    Three,
    Four,
}

/// All seats in turn order.
pub const ALL_SEATS: [Seat; 4] = [Seat::One, Seat::Two, Seat::Three, Seat::Four];

impl Seat {
    /// Zero-based index for per-player arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The player id, 1 to 4.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Parses a player id.
    pub fn from_number(n: u8) -> Result<Seat, BoardError> {
        match n {
            1 => Ok(Seat::One),
            2 => Ok(Seat::Two),
            3 => Ok(Seat::Three),
            4 => Ok(Seat::Four),
            _ => Err(BoardError::InvalidSeat(n)),
        }
    }

    /// The following seat in the cycle 1, 2, 3, 4, 1, ...
    #[inline]
    pub const fn next(self) -> Seat {
        ALL_SEATS[(self as usize + 1) % ALL_SEATS.len()]
    }
}

impl Serialize for Seat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    /// Owning seat; `None` marks a neutral piece.
    pub owner: Option<Seat>,
    /// Set once the piece has been promoted on the center square.
    pub upgraded: bool,
}

impl Piece {
    /// A piece belonging to a player.
    pub const fn new(kind: PieceKind, owner: Seat) -> Piece {
        Piece {
            kind,
            owner: Some(owner),
            upgraded: false,
        }
    }

    /// An immovable, uncapturable neutral piece.
    pub const fn neutral(kind: PieceKind) -> Piece {
        Piece {
            kind,
            owner: None,
            upgraded: false,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, seat: Seat) -> bool {
        self.owner == Some(seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seat_numbers() {
        for (i, seat) in ALL_SEATS.iter().enumerate() {
            assert_eq!(seat.index(), i);
            assert_eq!(Seat::from_number(seat.number()), Ok(*seat));
        }
        assert_eq!(Seat::from_number(0), Err(BoardError::InvalidSeat(0)));
        assert_eq!(Seat::from_number(5), Err(BoardError::InvalidSeat(5)));
    }

    #[test]
    fn seat_cycle_wraps() {
        assert_eq!(Seat::One.next(), Seat::Two);
        assert_eq!(Seat::Three.next(), Seat::Four);
        assert_eq!(Seat::Four.next(), Seat::One);
    }

    #[test]
    fn movement_classes() {
        assert!(PieceKind::Pawn.steps() && !PieceKind::Pawn.leaps());
        assert!(PieceKind::Knight.leaps() && !PieceKind::Knight.steps());
        assert!(PieceKind::Queen.steps() && PieceKind::Queen.leaps());
        assert!(!PieceKind::Rook.steps() && !PieceKind::Rook.leaps());
    }

    #[test]
    fn neutral_piece_has_no_owner() {
        let rook = Piece::neutral(PieceKind::Rook);
        assert_eq!(rook.owner, None);
        for seat in ALL_SEATS {
            assert!(!rook.is_owned_by(seat));
        }
        assert!(Piece::new(PieceKind::Pawn, Seat::Two).is_owned_by(Seat::Two));
    }
}
