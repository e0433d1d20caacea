//! Board coordinates.
//!
//! A `Square` is a (row, col) pair on the fixed 9x9 board. Squares built
//! from outside input go through `Square::new`, which rejects anything off
//! the board; inside the engine a `Square` is always in range.

use serde::Serialize;

use super::error::BoardError;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: usize = 9;

/// Total number of cells on the board.
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The absolute center of the board: reaching it promotes a piece.
pub const CENTER: Square = Square::at(4, 4);

/// Edge midpoints where no capture may be completed.
pub const SAFE_SQUARES: [Square; 4] = [
    Square::at(0, 4),
    Square::at(8, 4),
    Square::at(4, 0),
    Square::at(4, 8),
];

/// The four squares orthogonally adjacent to the center, home of the neutral rooks.
pub const NEUTRAL_ROOK_SQUARES: [Square; 4] = [
    Square::at(3, 4),
    Square::at(5, 4),
    Square::at(4, 3),
    Square::at(4, 5),
];

/// A position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from untrusted coordinates.
    pub fn new(row: i32, col: i32) -> Result<Square, BoardError> {
        if !(0..BOARD_SIZE as i32).contains(&row) || !(0..BOARD_SIZE as i32).contains(&col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(Square {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Builds a square from coordinates known to be on the board.
    ///
    /// Panics on out-of-range input; meant for constants and tests.
    pub const fn at(row: u8, col: u8) -> Square {
        assert!((row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE);
        Square { row, col }
    }

    /// Returns the square for a row-major cell index.
    pub const fn from_index(idx: usize) -> Square {
        Square::at((idx / BOARD_SIZE) as u8, (idx % BOARD_SIZE) as u8)
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major cell index in `0..SQUARE_COUNT`.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Returns the square displaced by (dr, dc), or `None` if it leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let row = self.row as i32 + dr as i32;
        let col = self.col as i32 + dc as i32;
        Square::new(row, col).ok()
    }

    /// Iterates over every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).map(Square::from_index)
    }
}

/// Returns true for the four capture-free edge midpoints.
#[inline]
pub fn is_safe_square(sq: Square) -> bool {
    SAFE_SQUARES.contains(&sq)
}

/// Manhattan distance to the center square.
#[inline]
pub fn manhattan_to_center(sq: Square) -> u8 {
    sq.row.abs_diff(CENTER.row) + sq.col.abs_diff(CENTER.col)
}

/// Chebyshev (king-move) distance between two squares.
#[inline]
pub fn chebyshev_distance(a: Square, b: Square) -> u8 {
    a.row.abs_diff(b.row).max(a.col.abs_diff(b.col))
}
