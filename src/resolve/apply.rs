//! Move application.
//!
//! Applies a single move to a snapshot and produces the next snapshot:
//! capture and elimination bookkeeping, promotion on the center square,
//! victory detection, and turn advancement.

use crate::board::{is_safe_square, GameState, Move, PieceKind, Seat, CENTER};

use super::turn::{next_seat, surviving_seats};

/// What happened while applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveEvents {
    pub mover: Seat,
    pub mv: Move,
    /// Seat whose piece was captured.
    pub captured: Option<Seat>,
    /// Set when the capture removed that seat's last piece.
    pub eliminated: Option<Seat>,
    pub promoted: bool,
    /// The game ended with this seat as the last one standing.
    pub winner: Option<Seat>,
    /// Seat to move next, when the game goes on.
    pub next: Option<Seat>,
}

/// Applies `mv` and returns the resulting snapshot.
///
/// An empty or neutral source square, or a game that has already ended,
/// leaves the state unchanged.
pub fn apply_move(state: &GameState, mv: Move) -> GameState {
    match resolve_move(state, mv) {
        Some((next, _)) => next,
        None => state.clone(),
    }
}

/// Applies `mv`, returning the new snapshot and a report of its effects,
/// or `None` if the move was rejected.
///
/// Legality of the destination is not checked here; callers pass moves taken
/// from `movegen`.
pub fn resolve_move(state: &GameState, mv: Move) -> Option<(GameState, MoveEvents)> {
    if !state.active {
        return None;
    }
    let mut piece = state.board.get(mv.from)?;
    let mover = piece.owner?;

    let mut next = state.clone();
    let mut events = MoveEvents {
        mover,
        mv,
        captured: None,
        eliminated: None,
        promoted: false,
        winner: None,
        next: None,
    };

    if let Some(victim) = state.board.get(mv.to).and_then(|t| t.owner) {
        if !is_safe_square(mv.to) {
            next.player_mut(mover).captures += 1;
            let target = next.player_mut(victim);
            target.lose_piece();
            events.captured = Some(victim);
            if target.eliminated {
                events.eliminated = Some(victim);
            }
        }
    }

    next.board.take(mv.from);
    if mv.to == CENTER && piece.kind != PieceKind::Queen {
        piece.kind = PieceKind::Queen;
        piece.upgraded = true;
        next.player_mut(mover).upgrades += 1;
        events.promoted = true;
    }
    next.board.set(mv.to, Some(piece));

    next.selected = None;
    next.highlights.clear();

    let survivors = surviving_seats(&next.players);
    if survivors.len() <= 1 {
        next.active = false;
        next.winner = survivors.first().copied();
        events.winner = next.winner;
        return Some((next, events));
    }

    if let Some(seat) = next_seat(&next.players, next.current) {
        next.current = seat;
        events.next = Some(seat);
    }
    Some((next, events))
}
