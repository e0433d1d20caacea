//! Per-piece destination generation.
//!
//! Pawns step one square in any of the 8 directions. Knights leap two
//! squares along any compass direction or make a 2-1 knight jump. Queens
//! have both move sets. Rooks never move.

use crate::board::{is_safe_square, GameState, Piece, Square};

/// Single-step offsets: every square at Chebyshev distance 1.
pub const STEP_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Leap offsets: length-2 compass leaps and 2-1 knight jumps.
pub const LEAP_OFFSETS: [(i8, i8); 16] = [
    (-2, 0),
    (2, 0),
    (0, -2),
    (0, 2),
    (-2, -2),
    (-2, 2),
    (2, -2),
    (2, 2),
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

/// Returns whether `piece` may land on `dest`.
///
/// An occupied safe square blocks everything. Otherwise the destination must
/// be empty or hold a piece of another player; neutral pieces are never
/// capture targets.
fn can_land(piece: &Piece, dest: Square, state: &GameState) -> bool {
    match state.board.get(dest) {
        None => true,
        Some(_) if is_safe_square(dest) => false,
        Some(target) => target.owner.is_some() && target.owner != piece.owner,
    }
}

fn push_targets(
    piece: &Piece,
    from: Square,
    offsets: &[(i8, i8)],
    state: &GameState,
    out: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        if let Some(dest) = from.offset(dr, dc) {
            if can_land(piece, dest, state) {
                out.push(dest);
            }
        }
    }
}

/// Generates every legal destination for the piece on `from`.
///
/// Returns an empty vec if the square is empty. Whose turn it is is not
/// checked here; callers only ask about the mover's own pieces.
pub fn legal_moves(state: &GameState, from: Square) -> Vec<Square> {
    let piece = match state.board.get(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut moves = Vec::new();
    if piece.kind.steps() {
        push_targets(&piece, from, &STEP_OFFSETS, state, &mut moves);
    }
    if piece.kind.leaps() {
        push_targets(&piece, from, &LEAP_OFFSETS, state, &mut moves);
    }
    moves
}
