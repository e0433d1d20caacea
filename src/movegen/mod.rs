//! Legal move generation.
//!
//! Enumerates legal destinations for a single piece and the full list of
//! legal moves for a seat, in row-major piece order.

pub mod movement;

use rand::Rng;

use crate::board::{GameState, Move, Seat};

pub use movement::{legal_moves, LEAP_OFFSETS, STEP_OFFSETS};

/// Generates every legal move for the pieces owned by `seat`.
///
/// Pieces are visited in row-major order and destinations in offset-table
/// order, so the result is stable for a given state.
pub fn all_moves(state: &GameState, seat: Seat) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in state.board.squares_of(seat) {
        for to in legal_moves(state, from) {
            moves.push(Move::new(from, to));
        }
    }
    moves
}

/// Returns true if `seat` has at least one legal move.
pub fn has_legal_move(state: &GameState, seat: Seat) -> bool {
    state
        .board
        .squares_of(seat)
        .any(|from| !legal_moves(state, from).is_empty())
}

/// Picks a uniformly random legal move for `seat`, if any exists.
pub fn random_move(state: &GameState, seat: Seat, rng: &mut impl Rng) -> Option<Move> {
    let moves = all_moves(state, seat);
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.gen_range(0..moves.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Piece, PieceKind, Square, ALL_SEATS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn opening_moves_for_each_seat() {
        let state = GameState::new(4).unwrap();
        for seat in ALL_SEATS {
            let moves = all_moves(&state, seat);
            assert!(!moves.is_empty());
            for mv in &moves {
                assert!(state.board.get(mv.from).unwrap().is_owned_by(seat));
                assert!(legal_moves(&state, mv.from).contains(&mv.to));
            }
        }
    }

    #[test]
    fn seat_one_opening_count() {
        // Knight (0,0): (0,2) (2,0) (2,2) (2,1) (1,2) = 5.
        // Pawn (1,0): (0,0) own, (0,1) own, (1,1) (2,0) (2,1) = 3.
        // Pawn (0,1): (0,0) own, (0,2) (1,0) own, (1,1) (1,2) = 3.
        let state = GameState::new(2).unwrap();
        assert_eq!(all_moves(&state, Seat::One).len(), 11);
    }

    #[test]
    fn inactive_seat_has_no_moves() {
        let state = GameState::new(2).unwrap();
        assert!(all_moves(&state, Seat::Three).is_empty());
        assert!(!has_legal_move(&state, Seat::Four));
        assert!(has_legal_move(&state, Seat::One));
    }

    #[test]
    fn seat_without_mobile_pieces_has_no_moves() {
        let mut state = GameState::new(2).unwrap();
        state.board = Board::empty();
        state.board.set(Square::at(4, 4), Some(Piece::neutral(PieceKind::Rook)));
        state.board.set(Square::at(0, 0), Some(Piece::new(PieceKind::Rook, Seat::One)));
        assert!(!has_legal_move(&state, Seat::One));
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_move(&state, Seat::One, &mut rng), None);
    }

    #[test]
    fn random_move_is_legal_and_deterministic() {
        let state = GameState::new(3).unwrap();
        for seed in 0..20 {
            let a = random_move(&state, Seat::Three, &mut StdRng::seed_from_u64(seed)).unwrap();
            let b = random_move(&state, Seat::Three, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(a, b);
            assert!(all_moves(&state, Seat::Three).contains(&a));
        }
    }
}
