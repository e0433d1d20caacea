//! Text protocol handling.
//!
//! Parses one command per line from a front end and renders engine output:
//! square lists, moves, and JSON game snapshots.

pub mod parser;
pub mod snapshot;

pub use parser::{parse_command, Command, DEFAULT_PLAYER_COUNT};
pub use snapshot::{encode_snapshot, format_move, format_square, format_squares, Snapshot};
