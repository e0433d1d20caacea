//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the main loop can dispatch on.

use crate::board::{Seat, Square};

/// Player count used by `newgame` without an argument.
pub const DEFAULT_PLAYER_COUNT: u8 = 4;

/// A parsed front-end-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Nci,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game with the given number of players.
    NewGame { players: u8 },

    /// Hand a seat to a human or to the AI.
    SetPlayer { seat: Seat, ai: bool },

    /// Tap a square as the human player to move.
    Select(Square),

    /// List legal destinations for the piece on a square.
    Moves(Square),

    /// Play a move for the human player to move.
    Move { from: Square, to: Square },

    /// Ask for the heuristic's preferred move for the seat to move.
    Go,

    /// Print a JSON snapshot of the game.
    Show,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "nci" => Some(Command::Nci),
        "isready" => Some(Command::IsReady),
        "go" => Some(Command::Go),
        "show" => Some(Command::Show),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(args),
        "setplayer" => parse_setplayer(args),
        "select" => parse_square(args).map(Command::Select),
        "moves" => parse_square(args).map(Command::Moves),
        "move" => parse_move(args),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `newgame [players]`.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    let players = match args.first() {
        None => DEFAULT_PLAYER_COUNT,
        Some(raw) => match raw.parse::<u8>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("invalid player count: '{}'", raw);
                return None;
            }
        },
    };
    Some(Command::NewGame { players })
}

/// Parses `setplayer <1-4> human|ai`.
fn parse_setplayer(args: &[&str]) -> Option<Command> {
    if args.len() < 2 {
        eprintln!("malformed setplayer: expected 'setplayer <n> human|ai'");
        return None;
    }
    let seat = match args[0].parse::<u8>().map(Seat::from_number) {
        Ok(Ok(seat)) => seat,
        Ok(Err(e)) => {
            eprintln!("{}", e);
            return None;
        }
        Err(_) => {
            eprintln!("invalid player id: '{}'", args[0]);
            return None;
        }
    };
    let ai = match args[1] {
        "ai" => true,
        "human" => false,
        other => {
            eprintln!("unknown controller: '{}'", other);
            return None;
        }
    };
    Some(Command::SetPlayer { seat, ai })
}

/// Parses a `<row> <col>` pair.
fn parse_square(args: &[&str]) -> Option<Square> {
    if args.len() < 2 {
        eprintln!("malformed square: expected '<row> <col>'");
        return None;
    }
    let row = parse_coord(args[0])?;
    let col = parse_coord(args[1])?;
    match Square::new(row, col) {
        Ok(sq) => Some(sq),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

fn parse_coord(raw: &str) -> Option<i32> {
    match raw.parse::<i32>() {
        Ok(v) => Some(v),
        Err(_) => {
            eprintln!("invalid coordinate: '{}'", raw);
            None
        }
    }
}

/// Parses `move <r1> <c1> <r2> <c2>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    if args.len() < 4 {
        eprintln!("malformed move: expected 'move <r1> <c1> <r2> <c2>'");
        return None;
    }
    let from = parse_square(&args[0..2])?;
    let to = parse_square(&args[2..4])?;
    Some(Command::Move { from, to })
}
