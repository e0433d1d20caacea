//! Game state representation.
//!
//! Holds the complete snapshot of a Neo-Chess game: the board, the four
//! player records, whose turn it is, the human selection, and whether the
//! game is still running. Transitions build a new snapshot rather than
//! mutating one that observers may still hold.

use serde::Serialize;

use super::error::BoardError;
use super::piece::{Piece, PieceKind, Seat, ALL_SEATS};
use super::player::Player;
use super::square::{Square, BOARD_SIZE, NEUTRAL_ROOK_SQUARES, SQUARE_COUNT};

/// The 9x9 grid of optional pieces, row-major.
///
/// Uses a fixed-size array indexed by `Square::index()` so the board is
/// trivially copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; SQUARE_COUNT],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [None; SQUARE_COUNT],
        }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.index()] = piece;
    }

    /// Removes and returns the piece on `sq`.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    /// Iterates over occupied squares in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|p| (Square::from_index(i), p)))
    }

    /// Iterates over the squares holding pieces owned by `seat`.
    pub fn squares_of(&self, seat: Seat) -> impl Iterator<Item = Square> + '_ {
        self.occupied()
            .filter(move |(_, p)| p.is_owned_by(seat))
            .map(|(sq, _)| sq)
    }

    /// Board contents as rows, for serialization.
    pub fn rows(&self) -> Vec<Vec<Option<Piece>>> {
        self.cells.chunks(BOARD_SIZE).map(|r| r.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Serialize for Board {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

/// Starting squares for one seat: knight first, then the two pawns.
fn home_squares(seat: Seat) -> [Square; 3] {
    match seat {
        Seat::One => [Square::at(0, 0), Square::at(1, 0), Square::at(0, 1)],
        Seat::Two => [Square::at(0, 8), Square::at(0, 7), Square::at(1, 8)],
        Seat::Three => [Square::at(8, 8), Square::at(7, 8), Square::at(8, 7)],
        Seat::Four => [Square::at(8, 0), Square::at(8, 1), Square::at(7, 0)],
    }
}

/// Complete game snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub board: Board,
    /// Player records indexed by `Seat::index()`.
    pub players: [Player; 4],
    /// Seat whose turn it is.
    pub current: Seat,
    /// Piece picked by the human player this turn.
    pub selected: Option<Square>,
    /// Legal destinations for `selected`.
    pub highlights: Vec<Square>,
    /// False once a winner has been found.
    pub active: bool,
    pub winner: Option<Seat>,
    pub player_count: u8,
}

impl GameState {
    /// Sets up a fresh game for 2, 3 or 4 players.
    pub fn new(player_count: u8) -> Result<Self, BoardError> {
        if !(2..=4).contains(&player_count) {
            return Err(BoardError::InvalidPlayerCount(player_count));
        }

        let mut board = Board::empty();
        for sq in NEUTRAL_ROOK_SQUARES {
            board.set(sq, Some(Piece::neutral(PieceKind::Rook)));
        }

        let players = ALL_SEATS.map(|seat| Player::new(seat, seat.number() <= player_count));
        for seat in ALL_SEATS {
            if !players[seat.index()].active {
                continue;
            }
            let [knight, pawn_a, pawn_b] = home_squares(seat);
            board.set(knight, Some(Piece::new(PieceKind::Knight, seat)));
            board.set(pawn_a, Some(Piece::new(PieceKind::Pawn, seat)));
            board.set(pawn_b, Some(Piece::new(PieceKind::Pawn, seat)));
        }

        Ok(GameState {
            board,
            players,
            current: Seat::One,
            selected: None,
            highlights: Vec::new(),
            active: true,
            winner: None,
            player_count,
        })
    }

    #[inline]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat.index()]
    }

    /// The record of the seat to move.
    #[inline]
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Returns a copy with `seat` handed to the AI or to a human.
    pub fn with_ai(&self, seat: Seat, is_ai: bool) -> GameState {
        let mut next = self.clone();
        next.player_mut(seat).is_ai = is_ai;
        next
    }
}
