//! Turn sequencing.
//!
//! Decides who moves next and whether the game is over. Seats cycle
//! 1, 2, 3, 4, 1, ... skipping seats that are not in this game or have been
//! eliminated.

use crate::board::{Player, Seat, ALL_SEATS};

/// Seats still taking turns, in seat order.
pub fn surviving_seats(players: &[Player; 4]) -> Vec<Seat> {
    ALL_SEATS
        .iter()
        .copied()
        .filter(|s| players[s.index()].in_play())
        .collect()
}

/// Returns the sole surviving seat, if exactly one remains.
pub fn winner(players: &[Player; 4]) -> Option<Seat> {
    match surviving_seats(players).as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

/// Finds the next seat after `current` that is still in play.
///
/// Checks every other seat once, then `current` itself; returns `None` only
/// when no seat is in play at all.
pub fn next_seat(players: &[Player; 4], current: Seat) -> Option<Seat> {
    let mut seat = current;
    for _ in 0..ALL_SEATS.len() {
        seat = seat.next();
        if players[seat.index()].in_play() {
            return Some(seat);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(count: u8) -> [Player; 4] {
        ALL_SEATS.map(|s| Player::new(s, s.number() <= count))
    }

    #[test]
    fn cycles_through_all_four() {
        let p = players(4);
        assert_eq!(next_seat(&p, Seat::One), Some(Seat::Two));
        assert_eq!(next_seat(&p, Seat::Two), Some(Seat::Three));
        assert_eq!(next_seat(&p, Seat::Three), Some(Seat::Four));
        assert_eq!(next_seat(&p, Seat::Four), Some(Seat::One));
    }

    #[test]
    fn skips_inactive_seats() {
        let p = players(2);
        assert_eq!(next_seat(&p, Seat::One), Some(Seat::Two));
        assert_eq!(next_seat(&p, Seat::Two), Some(Seat::One));

        let p = players(3);
        assert_eq!(next_seat(&p, Seat::Three), Some(Seat::One));
    }

    #[test]
    fn skips_eliminated_seats() {
        let mut p = players(4);
        p[Seat::Three.index()].eliminated = true;
        p[Seat::Three.index()].pieces = 0;
        assert_eq!(next_seat(&p, Seat::Two), Some(Seat::Four));
        p[Seat::Four.index()].eliminated = true;
        assert_eq!(next_seat(&p, Seat::Two), Some(Seat::One));
    }

    #[test]
    fn never_lands_on_out_of_play_seat() {
        let mut p = players(4);
        p[Seat::Two.index()].eliminated = true;
        for seat in ALL_SEATS {
            let next = next_seat(&p, seat).unwrap();
            assert!(p[next.index()].in_play());
            assert_ne!(next, Seat::Two);
        }
    }

    #[test]
    fn winner_requires_single_survivor() {
        let mut p = players(3);
        assert_eq!(winner(&p), None);
        p[Seat::One.index()].eliminated = true;
        assert_eq!(winner(&p), None);
        p[Seat::Three.index()].eliminated = true;
        assert_eq!(winner(&p), Some(Seat::Two));
        assert_eq!(surviving_seats(&p), vec![Seat::Two]);
    }

    #[test]
    fn no_seat_in_play() {
        let mut p = players(2);
        p[0].eliminated = true;
        p[1].eliminated = true;
        assert_eq!(next_seat(&p, Seat::One), None);
        assert_eq!(winner(&p), None);
    }
}
