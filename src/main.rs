//! neochess -- a Neo-Chess engine speaking a line-based text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Stdin is read on a helper thread so the main loop can wake up when the
//! AI's pending move falls due and apply it between commands.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use neochess::board::{Move, ALL_SEATS};
use neochess::engine::{write_events, Engine};
use neochess::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop until `quit` or end of input.
fn main() {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = run(&mut out) {
        eprintln!("output error: {}", e);
    }
}

fn run<W: Write>(out: &mut W) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut engine = Engine::new();
    let mut stall_reported = false;

    loop {
        // At most one full round of due AI moves before input is checked again.
        for _ in 0..ALL_SEATS.len() {
            match engine.poll(Instant::now()) {
                Some(events) => write_events(&events, out)?,
                None => break,
            }
        }
        if engine.is_stalled() {
            if !stall_reported {
                if let Some(state) = engine.state() {
                    writeln!(out, "info stalled {}", state.current.number())?;
                    out.flush()?;
                }
                stall_reported = true;
            }
        } else {
            stall_reported = false;
        }

        let line = match engine.time_until_due(Instant::now()) {
            Some(wait) => match rx.recv_timeout(wait) {
                Ok(line) => line,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(line) => line,
                Err(_) => break,
            },
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Nci => engine.handle_nci(out)?,
            Command::IsReady => engine.handle_isready(out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame { players } => {
                if let Err(e) = engine.new_game(players) {
                    eprintln!("newgame: {}", e);
                }
            }
            Command::SetPlayer { seat, ai } => engine.set_controller(seat, ai),
            Command::Select(sq) => engine.handle_select(sq, out)?,
            Command::Moves(sq) => engine.handle_moves(sq, out)?,
            Command::Move { from, to } => engine.handle_move(Move::new(from, to), out)?,
            Command::Go => engine.handle_go(out)?,
            Command::Show => engine.handle_show(out)?,
            Command::Quit => break,
        }
    }
    out.flush()
}
