//! Neo-Chess engine library.
//!
//! Exposes the board representation, move generation, move resolution,
//! AI move selection, and protocol modules for use by the binaries,
//! integration tests, and benches.

pub mod board;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod schedule;
pub mod search;
pub mod selfplay;
