//! Self-play game generation.
//!
//! Plays full games with every seat under AI control, recording each ply,
//! the outcome, and final player stats. Games run sequentially or across a
//! rayon pool, and records are written as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{BoardError, GameState, Move, Player, Seat, ALL_SEATS};
use crate::movegen::random_move;
use crate::resolve::resolve_move;
use crate::search::choose_ai_move;

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Players per game (2, 3 or 4).
    pub players: u8,
    /// Plies after which an unfinished game is abandoned.
    pub max_plies: usize,
    /// Probability of replacing the heuristic move with a uniformly random one.
    pub exploration: f64,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            max_plies: 400,
            exploration: 0.0,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// How a self-play game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// One seat is left standing.
    Won,
    /// The AI seat to move had no legal move.
    Stalled,
    /// The ply limit was reached.
    MaxPlies,
}

/// A single recorded ply.
#[derive(Debug, Clone, Serialize)]
pub struct PlyRecord {
    pub ply: usize,
    pub seat: Seat,
    #[serde(flatten)]
    pub mv: Move,
    pub captured: Option<Seat>,
    pub promoted: bool,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub players: u8,
    pub outcome: Outcome,
    pub winner: Option<Seat>,
    /// Seat to move when the game stopped.
    pub last_to_move: Seat,
    /// Player stats at the end of the game, for seats in this game.
    pub final_stats: Vec<Player>,
    pub plies: Vec<PlyRecord>,
}

/// Plays a single self-play game and returns the game record.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, BoardError> {
    let mut state = GameState::new(config.players)?;
    for seat in ALL_SEATS {
        state = state.with_ai(seat, true);
    }

    let mut plies = Vec::new();
    let outcome = loop {
        if !state.active {
            break Outcome::Won;
        }
        if plies.len() >= config.max_plies {
            break Outcome::MaxPlies;
        }

        let chosen = if config.exploration > 0.0 && rng.gen::<f64>() < config.exploration {
            random_move(&state, state.current, rng)
        } else {
            choose_ai_move(&state, rng)
        };
        let Some(mv) = chosen else {
            break Outcome::Stalled;
        };
        let Some((next, events)) = resolve_move(&state, mv) else {
            break Outcome::Stalled;
        };

        plies.push(PlyRecord {
            ply: plies.len(),
            seat: events.mover,
            mv,
            captured: events.captured,
            promoted: events.promoted,
        });
        state = next;
    };

    Ok(GameRecord {
        game_id,
        players: config.players,
        outcome,
        winner: state.winner,
        last_to_move: state.current,
        final_stats: state.players.iter().filter(|p| p.active).copied().collect(),
        plies,
    })
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, BoardError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// Games arrive in completion order, which differs from `game_id` order
/// when running in parallel.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), BoardError>
where
    F: FnMut(GameRecord) + Send,
{
    // Fail on a bad configuration before spawning anything.
    GameState::new(config.players)?;
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
    Ok(())
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn report_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match (game.outcome, game.winner) {
        (Outcome::Won, Some(w)) => format!("player {} wins", w.number()),
        (Outcome::Stalled, _) => format!("stalled on player {}", game.last_to_move.number()),
        _ => "unfinished".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} plies ({:.2}s)",
        n,
        config.num_games,
        outcome,
        game.plies.len(),
        started.elapsed().as_secs_f64(),
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let mut rng = game_rng(config.seed, i);
        match play_game(config, i, &mut rng) {
            Ok(game) => {
                report_game(config, i + 1, &game, started);
                on_game(game);
            }
            Err(e) => eprintln!("game {}: {}", i, e),
        }
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("failed to build thread pool ({}), playing sequentially", e);
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let started = Instant::now();
                        let mut rng = game_rng(config.seed, i);
                        match play_game(config, i, &mut rng) {
                            Ok(game) => {
                                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                                report_game(config, n, &game, started);
                                let _ = tx.send(game);
                            }
                            Err(e) => eprintln!("game {}: {}", i, e),
                        }
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let mut win_counts = [0usize; 4];
    let mut stalled = 0usize;
    let mut unfinished = 0usize;
    let mut total_plies = 0usize;
    let mut promotions = 0usize;
    let mut captures = 0usize;

    for game in games {
        total_plies += game.plies.len();
        promotions += game.plies.iter().filter(|p| p.promoted).count();
        captures += game.plies.iter().filter(|p| p.captured.is_some()).count();
        match (game.outcome, game.winner) {
            (Outcome::Won, Some(w)) => win_counts[w.index()] += 1,
            (Outcome::Stalled, _) => stalled += 1,
            _ => unfinished += 1,
        }
    }

    let per_game = |n: usize| n as f64 / total.max(1) as f64;
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Avg plies/game: {:.1}", per_game(total_plies));
    eprintln!("Avg captures/game: {:.1}", per_game(captures));
    eprintln!("Avg promotions/game: {:.1}", per_game(promotions));
    eprintln!("Stalled: {}", stalled);
    eprintln!("Unfinished: {}", unfinished);
    eprintln!("Win distribution:");
    for seat in ALL_SEATS {
        let wins = win_counts[seat.index()];
        eprintln!(
            "  player {}: {} ({:.1}%)",
            seat.number(),
            wins,
            100.0 * per_game(wins)
        );
    }
}
