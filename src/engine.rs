//! Engine state management.
//!
//! Holds the current game snapshot, engine options, the AI's random source,
//! and the timer for the AI's pending move. Every transition replaces the
//! snapshot wholesale. When the seat to move is AI-controlled the engine
//! picks its move right away and schedules it after the `AiDelay` pause;
//! `poll` applies it once due.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{BoardError, GameState, Move, Seat, Square};
use crate::eval::NOISE_RANGE;
use crate::movegen::legal_moves;
use crate::protocol::{encode_snapshot, format_move, format_square, format_squares};
use crate::resolve::{resolve_move, select_square_with_events, MoveEvents};
use crate::schedule::MoveTimer;
use crate::search::{best_move_for, choose_ai_move};

/// Default pause before an AI move is applied, in milliseconds.
const DEFAULT_AI_DELAY_MS: u64 = 1000;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    state: Option<GameState>,
    pub options: HashMap<String, String>,
    timer: MoveTimer,
    rng: SmallRng,
    /// Controllers carried over into the next game.
    ai_seats: [bool; 4],
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            state: None,
            options: HashMap::new(),
            timer: MoveTimer::new(),
            rng: SmallRng::from_entropy(),
            ai_seats: [false, true, true, true],
        }
    }

    /// The current snapshot, if a game has been started.
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// The id of the current game session.
    pub fn session(&self) -> u64 {
        self.timer.session()
    }

    /// Starts a fresh game, discarding the previous one and any AI move
    /// still pending from it.
    pub fn new_game(&mut self, player_count: u8) -> Result<(), BoardError> {
        let mut state = GameState::new(player_count)?;
        for (player, &ai) in state.players.iter_mut().zip(self.ai_seats.iter()) {
            player.is_ai = ai;
        }
        self.timer.start_session();
        self.state = Some(state);
        self.schedule_ai_turn(Instant::now());
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            if let Some(seed) = value.as_deref().and_then(|v| v.parse::<u64>().ok()) {
                self.reseed(seed);
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Reseeds the AI's random source; 0 draws a fresh seed from the OS.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = if seed != 0 {
            SmallRng::seed_from_u64(seed)
        } else {
            SmallRng::from_entropy()
        };
    }

    /// Returns the configured AI pacing delay, or the default.
    pub fn ai_delay(&self) -> Duration {
        let ms = self
            .options
            .get("AiDelay")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_AI_DELAY_MS);
        Duration::from_millis(ms)
    }

    /// Hands `seat` to the AI or to a human, for this game and the next.
    ///
    /// Any pending AI move is dropped and the turn re-evaluated.
    pub fn set_controller(&mut self, seat: Seat, ai: bool) {
        self.ai_seats[seat.index()] = ai;
        if let Some(state) = &self.state {
            self.state = Some(state.with_ai(seat, ai));
            self.timer.cancel();
            self.schedule_ai_turn(Instant::now());
        }
    }

    /// Legal destinations for the piece on `sq`; empty without a game.
    pub fn legal_moves(&self, sq: Square) -> Vec<Square> {
        match &self.state {
            Some(state) => legal_moves(state, sq),
            None => Vec::new(),
        }
    }

    /// Handles a human tap on `sq`, returning the move it completed, if any.
    pub fn select_square(&mut self, sq: Square) -> Option<MoveEvents> {
        let state = self.state.as_ref()?;
        let (next, events) = select_square_with_events(state, sq);
        self.state = Some(next);
        if events.is_some() {
            self.schedule_ai_turn(Instant::now());
        }
        events
    }

    /// Plays a move for the human seat to move.
    ///
    /// Returns `None`, leaving the game untouched, when the seat to move is
    /// AI-controlled or the move is not legal.
    pub fn play_move(&mut self, mv: Move) -> Option<MoveEvents> {
        let state = self.state.as_ref()?;
        if !state.active || state.current_player().is_ai {
            return None;
        }
        let own = state
            .board
            .get(mv.from)
            .is_some_and(|p| p.is_owned_by(state.current));
        if !own || !legal_moves(state, mv.from).contains(&mv.to) {
            return None;
        }
        let (next, events) = resolve_move(state, mv)?;
        self.state = Some(next);
        self.schedule_ai_turn(Instant::now());
        Some(events)
    }

    /// Picks and schedules the AI's move when it is an AI seat's turn.
    ///
    /// An AI seat without a legal move is left to move, and the game waits.
    fn schedule_ai_turn(&mut self, now: Instant) {
        if self.timer.pending().is_some() {
            return;
        }
        let Some(state) = &self.state else {
            return;
        };
        if let Some(mv) = choose_ai_move(state, &mut self.rng) {
            let delay = self.ai_delay();
            self.timer.schedule(mv, delay, now);
        }
    }

    /// Returns true when an AI seat is to move but cannot.
    pub fn is_stalled(&self) -> bool {
        match &self.state {
            Some(state) => {
                state.active
                    && state.current_player().is_ai
                    && self.timer.pending().is_none()
            }
            None => false,
        }
    }

    /// Time left until the pending AI move is due.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.timer.time_until_due(now)
    }

    /// Applies the pending AI move if it is due, then schedules the next one.
    pub fn poll(&mut self, now: Instant) -> Option<MoveEvents> {
        let mv = self.timer.take_due(now)?;
        let state = self.state.as_ref()?;
        let (next, events) = resolve_move(state, mv)?;
        self.state = Some(next);
        self.schedule_ai_turn(now);
        Some(events)
    }

    /// Handles the handshake: writes id, options, protocol_version, and nciok.
    pub fn handle_nci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name neochess")?;
        writeln!(out, "id author neochess")?;
        writeln!(
            out,
            "option name AiDelay type spin default {} min 0 max 60000",
            DEFAULT_AI_DELAY_MS
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "nciok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `moves` command.
    pub fn handle_moves<W: Write>(&self, sq: Square, out: &mut W) -> io::Result<()> {
        let moves = self.legal_moves(sq);
        if moves.is_empty() {
            writeln!(out, "legalmoves")?;
        } else {
            writeln!(out, "legalmoves {}", format_squares(&moves))?;
        }
        out.flush()
    }

    /// Handles the `select` command: reports the selection, or the move it made.
    pub fn handle_select<W: Write>(&mut self, sq: Square, out: &mut W) -> io::Result<()> {
        if self.state.is_none() {
            eprintln!("select: no game in progress");
            return Ok(());
        }
        if let Some(events) = self.select_square(sq) {
            return write_events(&events, out);
        }
        let Some(state) = &self.state else {
            return Ok(());
        };
        match state.selected {
            Some(sel) if state.highlights.is_empty() => {
                writeln!(out, "selected {} moves", format_square(sel))?
            }
            Some(sel) => writeln!(
                out,
                "selected {} moves {}",
                format_square(sel),
                format_squares(&state.highlights)
            )?,
            None => writeln!(out, "selected none")?,
        }
        out.flush()
    }

    /// Handles the `move` command.
    pub fn handle_move<W: Write>(&mut self, mv: Move, out: &mut W) -> io::Result<()> {
        match self.play_move(mv) {
            Some(events) => write_events(&events, out),
            None => {
                eprintln!("move {}: not playable now", format_move(mv));
                Ok(())
            }
        }
    }

    /// Handles the `go` command: suggests a move for the seat to move
    /// without playing it.
    pub fn handle_go<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let state = match &self.state {
            Some(s) => s,
            None => {
                eprintln!("go: no game in progress");
                return Ok(());
            }
        };
        let suggestion = if state.active {
            let rng = &mut self.rng;
            best_move_for(state, state.current, || rng.gen_range(0.0..NOISE_RANGE))
        } else {
            None
        };
        match suggestion {
            Some(best) => writeln!(out, "bestmove {}", format_move(best.mv))?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let state = match &self.state {
            Some(s) => s,
            None => {
                eprintln!("show: no game in progress");
                return Ok(());
            }
        };
        let json = encode_snapshot(self.session(), state).map_err(io::Error::other)?;
        writeln!(out, "state {}", json)?;
        out.flush()
    }
}

/// Writes the `info` lines describing an applied move.
pub fn write_events<W: Write>(events: &MoveEvents, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "info move {} {}",
        events.mover.number(),
        format_move(events.mv)
    )?;
    if let Some(victim) = events.captured {
        writeln!(out, "info capture {} {}", events.mover.number(), victim.number())?;
    }
    if let Some(out_seat) = events.eliminated {
        writeln!(out, "info eliminated {}", out_seat.number())?;
    }
    if events.promoted {
        writeln!(
            out,
            "info promote {} {}",
            events.mover.number(),
            format_square(events.mv.to)
        )?;
    }
    if let Some(w) = events.winner {
        writeln!(out, "gameover winner {}", w.number())?;
    } else if let Some(next) = events.next {
        writeln!(out, "info turn {}", next.number())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Piece, PieceKind, CENTER};

    fn sq(row: u8, col: u8) -> Square {
        Square::at(row, col)
    }

    fn instant_engine() -> Engine {
        let mut engine = Engine::new();
        engine.set_option("AiDelay".to_string(), Some("0".to_string()));
        engine.set_option("Seed".to_string(), Some("42".to_string()));
        engine
    }

    fn output<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn new_engine_has_no_game() {
        let engine = Engine::new();
        assert!(engine.state().is_none());
        assert!(engine.options.is_empty());
        assert_eq!(engine.ai_delay(), Duration::from_millis(DEFAULT_AI_DELAY_MS));
        assert!(!engine.is_stalled());
    }

    #[test]
    fn new_game_rejects_bad_player_count() {
        let mut engine = Engine::new();
        assert_eq!(engine.new_game(5), Err(BoardError::InvalidPlayerCount(5)));
        assert!(engine.state().is_none());
    }

    #[test]
    fn options_are_stored() {
        let mut engine = Engine::new();
        engine.set_option("AiDelay".to_string(), Some("250".to_string()));
        assert_eq!(engine.ai_delay(), Duration::from_millis(250));
        engine.set_option("Flag".to_string(), None);
        assert_eq!(engine.options.get("Flag"), Some(&String::new()));
    }

    #[test]
    fn human_move_schedules_ai_reply() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        assert!(engine.time_until_due(Instant::now()).is_none());

        let events = engine.play_move(Move::new(sq(0, 0), sq(2, 2))).unwrap();
        assert_eq!(events.next, Some(Seat::Two));
        assert_eq!(engine.time_until_due(Instant::now()), Some(Duration::ZERO));

        let reply = engine.poll(Instant::now()).unwrap();
        assert_eq!(reply.mover, Seat::Two);
        assert_eq!(engine.state().unwrap().current, Seat::One);
        assert!(engine.time_until_due(Instant::now()).is_none());
    }

    #[test]
    fn illegal_or_out_of_turn_moves_are_ignored() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        let before = engine.state().unwrap().clone();
        assert!(engine.play_move(Move::new(sq(0, 0), sq(3, 3))).is_none());
        assert!(engine.play_move(Move::new(sq(0, 8), sq(2, 8))).is_none());
        assert!(engine.play_move(Move::new(sq(5, 5), sq(5, 6))).is_none());
        assert_eq!(engine.state().unwrap(), &before);
    }

    #[test]
    fn ai_move_waits_for_delay() {
        let mut engine = Engine::new();
        engine.set_option("AiDelay".to_string(), Some("60000".to_string()));
        engine.new_game(2).unwrap();
        engine.play_move(Move::new(sq(0, 0), sq(2, 2))).unwrap();
        let now = Instant::now();
        assert!(engine.poll(now).is_none());
        assert_eq!(engine.state().unwrap().current, Seat::Two);
        assert!(engine.poll(now + Duration::from_secs(61)).is_some());
    }

    #[test]
    fn new_game_cancels_pending_ai_move() {
        let mut engine = Engine::new();
        engine.set_option("AiDelay".to_string(), Some("60000".to_string()));
        engine.new_game(2).unwrap();
        engine.play_move(Move::new(sq(0, 0), sq(2, 2))).unwrap();
        let old_session = engine.session();
        assert!(engine.time_until_due(Instant::now()).is_some());

        engine.new_game(2).unwrap();
        assert_ne!(engine.session(), old_session);
        assert!(engine.time_until_due(Instant::now()).is_none());
        let fresh = engine.state().unwrap().clone();
        assert!(engine.poll(Instant::now() + Duration::from_secs(120)).is_none());
        assert_eq!(engine.state().unwrap(), &fresh);
    }

    #[test]
    fn all_ai_game_starts_immediately() {
        let mut engine = instant_engine();
        engine.set_controller(Seat::One, true);
        engine.new_game(4).unwrap();
        let events = engine.poll(Instant::now()).unwrap();
        assert_eq!(events.mover, Seat::One);
        assert_eq!(engine.state().unwrap().current, Seat::Two);
    }

    #[test]
    fn handing_seat_to_human_cancels_ai_move() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        engine.play_move(Move::new(sq(0, 0), sq(2, 2))).unwrap();
        engine.set_controller(Seat::Two, false);
        assert!(engine.poll(Instant::now()).is_none());
        assert!(engine.play_move(Move::new(sq(0, 8), sq(2, 6))).is_some());
    }

    #[test]
    fn select_then_move() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        assert!(engine.select_square(sq(0, 0)).is_none());
        assert_eq!(engine.state().unwrap().selected, Some(sq(0, 0)));
        let events = engine.select_square(sq(2, 2)).unwrap();
        assert_eq!(events.mv, Move::new(sq(0, 0), sq(2, 2)));
        assert!(engine.poll(Instant::now()).is_some());
    }

    #[test]
    fn stalled_ai_seat_is_reported() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        let mut state = engine.state().unwrap().clone();
        state.board = Board::empty();
        state.board.set(sq(0, 0), Some(Piece::new(PieceKind::Pawn, Seat::One)));
        // A rook never moves, so seat two has nothing to play.
        state.board.set(sq(8, 8), Some(Piece::new(PieceKind::Rook, Seat::Two)));
        engine.state = Some(state);
        engine.play_move(Move::new(sq(0, 0), sq(1, 1))).unwrap();
        assert!(engine.is_stalled());
        assert!(engine.poll(Instant::now()).is_none());
        assert_eq!(engine.state().unwrap().current, Seat::Two);
    }

    #[test]
    fn handshake_and_ready() {
        let engine = Engine::new();
        let text = output(|o| engine.handle_nci(o));
        assert!(text.contains("id name neochess"));
        assert!(text.contains("option name AiDelay"));
        assert!(text.trim_end().ends_with("nciok"));
        assert_eq!(output(|o| engine.handle_isready(o)).trim(), "readyok");
    }

    #[test]
    fn moves_output_lists_squares() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        let text = output(|o| engine.handle_moves(sq(1, 0), o));
        assert_eq!(text.trim(), "legalmoves 1,1 2,0 2,1");
        let text = output(|o| engine.handle_moves(sq(3, 4), o));
        assert_eq!(text.trim(), "legalmoves");
    }

    #[test]
    fn select_output() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        let text = output(|o| engine.handle_select(sq(1, 0), o));
        assert_eq!(text.trim(), "selected 1,0 moves 1,1 2,0 2,1");
        let text = output(|o| engine.handle_select(sq(7, 7), o));
        assert_eq!(text.trim(), "selected none");
    }

    #[test]
    fn move_output_reports_turn() {
        let mut engine = instant_engine();
        engine.new_game(2).unwrap();
        let text = output(|o| engine.handle_move(Move::new(sq(0, 0), sq(2, 2)), o));
        assert_eq!(text.lines().collect::<Vec<_>>(), vec!["info move 1 0 0 2 2", "info turn 2"]);
    }

    #[test]
    fn events_output_for_promotion_and_win() {
        let events = MoveEvents {
            mover: Seat::Three,
            mv: Move::new(sq(3, 3), CENTER),
            captured: Some(Seat::One),
            eliminated: Some(Seat::One),
            promoted: true,
            winner: Some(Seat::Three),
            next: None,
        };
        let text = output(|o| write_events(&events, o));
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                "info move 3 3 3 4 4",
                "info capture 3 1",
                "info eliminated 1",
                "info promote 3 4,4",
                "gameover winner 3",
            ]
        );
    }

    #[test]
    fn go_suggests_a_legal_move() {
        let mut engine = instant_engine();
        let text = output(|o| engine.handle_go(o));
        assert!(text.is_empty());
        engine.new_game(2).unwrap();
        let text = output(|o| engine.handle_go(o));
        assert!(text.starts_with("bestmove "));
        assert_ne!(text.trim(), "bestmove none");
        // Suggesting does not play.
        assert_eq!(engine.state().unwrap().current, Seat::One);
    }

    #[test]
    fn show_outputs_json_state() {
        let mut engine = instant_engine();
        engine.new_game(3).unwrap();
        let text = output(|o| engine.handle_show(o));
        let json = text.trim().strip_prefix("state ").unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["player_count"], 3);
        assert_eq!(value["session"], engine.session());
    }
}
