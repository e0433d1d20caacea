//! Deferred AI moves.
//!
//! The AI decides immediately but its move is applied after a pacing delay.
//! At most one move is pending. Every pending move is tagged with the game
//! session it was chosen in; starting a new session drops it, and a move
//! whose tag no longer matches is never released.

use std::time::{Duration, Instant};

use crate::board::Move;

/// A move waiting for its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeferredMove {
    pub session: u64,
    pub due: Instant,
    pub mv: Move,
}

/// Single-slot timer for the AI's pending move.
#[derive(Debug, Default)]
pub struct MoveTimer {
    session: u64,
    pending: Option<DeferredMove>,
}

impl MoveTimer {
    pub fn new() -> Self {
        MoveTimer::default()
    }

    /// The current session id.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Starts a new session, cancelling whatever was pending.
    pub fn start_session(&mut self) -> u64 {
        self.session = self.session.wrapping_add(1);
        self.pending = None;
        self.session
    }

    /// Schedules `mv` to be released `delay` after `now`, replacing any
    /// pending move.
    pub fn schedule(&mut self, mv: Move, delay: Duration, now: Instant) {
        self.pending = Some(DeferredMove {
            session: self.session,
            due: now + delay,
            mv,
        });
    }

    /// Drops the pending move, if any.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&DeferredMove> {
        self.pending.as_ref()
    }

    /// Time left until the pending move is due; `None` when nothing is pending.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Releases the pending move once it is due.
    ///
    /// A move tagged with an older session is discarded instead.
    pub fn take_due(&mut self, now: Instant) -> Option<Move> {
        let pending = self.pending?;
        if pending.session != self.session {
            self.pending = None;
            return None;
        }
        if pending.due > now {
            return None;
        }
        self.pending = None;
        Some(pending.mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;

    fn mv() -> Move {
        Move::new(Square::at(0, 8), Square::at(2, 6))
    }

    #[test]
    fn releases_only_when_due() {
        let mut timer = MoveTimer::new();
        let start = Instant::now();
        timer.schedule(mv(), Duration::from_millis(500), start);
        assert_eq!(timer.time_until_due(start), Some(Duration::from_millis(500)));
        assert_eq!(timer.take_due(start + Duration::from_millis(499)), None);
        assert!(timer.pending().is_some());
        assert_eq!(timer.take_due(start + Duration::from_millis(500)), Some(mv()));
        assert!(timer.pending().is_none());
        assert_eq!(timer.take_due(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut timer = MoveTimer::new();
        let now = Instant::now();
        timer.schedule(mv(), Duration::ZERO, now);
        assert_eq!(timer.time_until_due(now), Some(Duration::ZERO));
        assert_eq!(timer.take_due(now), Some(mv()));
    }

    #[test]
    fn new_session_cancels_pending_move() {
        let mut timer = MoveTimer::new();
        let now = Instant::now();
        let first = timer.session();
        timer.schedule(mv(), Duration::ZERO, now);
        let second = timer.start_session();
        assert_ne!(first, second);
        assert!(timer.pending().is_none());
        assert_eq!(timer.take_due(now + Duration::from_secs(1)), None);
    }

    #[test]
    fn stale_session_tag_is_discarded() {
        let mut timer = MoveTimer::new();
        let now = Instant::now();
        timer.schedule(mv(), Duration::ZERO, now);
        let stale = *timer.pending().unwrap();
        timer.start_session();
        // Re-inserting a move from the old session must not fire.
        timer.pending = Some(stale);
        assert_eq!(timer.take_due(now), None);
        assert!(timer.pending().is_none());
    }

    #[test]
    fn cancel_clears_slot() {
        let mut timer = MoveTimer::new();
        timer.schedule(mv(), Duration::from_secs(1), Instant::now());
        timer.cancel();
        assert_eq!(timer.time_until_due(Instant::now()), None);
    }
}
