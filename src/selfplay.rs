//! Self-play game generation.
//!
//! Plays advisor-vs-advisor games from a named preset, optionally mixing in
//! uniformly random moves for exploration. Records every turn with the
//! piece counts after it and a balance estimate for the mover.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{BoardError, Counts, Move, Outcome, Player, Preset, DEFAULT_SIZE};
use crate::eval::{evaluate, score_move};
use crate::game::{Game, GameError, Turn};
use crate::movegen::random_move;
use crate::search::TieBreak;

#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Name of the starting preset.
    pub preset: String,
    /// Board side length.
    pub size: usize,
    /// Turns after which an undecided game is abandoned.
    pub max_plies: usize,
    /// How the advisor picks among equally scored moves.
    pub tie_break: TieBreak,
    /// Probability of replacing the advisor's move with a random legal one.
    pub epsilon: f64,
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
            preset: "corners".to_string(),
            size: DEFAULT_SIZE,
            max_plies: 400,
            tie_break: TieBreak::First,
            epsilon: 0.0,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A single recorded turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlyRecord {
    pub ply: usize,
    pub player: Player,
    /// `None` for a pass.
    pub mv: Option<Move>,
    pub converted: usize,
    /// Whether the move was sampled at random instead of advised.
    pub explored: bool,
    /// Counts after the turn.
    pub counts: Counts,
    /// Piece balance for `player` after the turn.
    pub value: f32,
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub preset: String,
    pub size: usize,
    pub plies: Vec<PlyRecord>,
    pub outcome: Outcome,
    /// False when the game hit `max_plies` undecided.
    pub finished: bool,
    pub final_counts: Counts,
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub games: usize,
    pub black_wins: usize,
    pub white_wins: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub avg_plies: f64,
}

impl Summary {
    pub fn of(games: &[GameRecord]) -> Summary {
        let mut summary = Summary {
            games: games.len(),
            ..Summary::default()
        };
        let mut total_plies = 0usize;
        for game in games {
            total_plies += game.plies.len();
            match game.outcome {
                Outcome::Win(Player::Black) => summary.black_wins += 1,
                Outcome::Win(Player::White) => summary.white_wins += 1,
                Outcome::Draw => summary.draws += 1,
                Outcome::Ongoing => summary.unfinished += 1,
            }
        }
        summary.avg_plies = total_plies as f64 / games.len().max(1) as f64;
        summary
    }
}

/// Seeds the generator for one game so that a run is reproducible
/// regardless of thread count.
fn game_rng(config: &SelfPlayConfig, game_id: usize) -> SmallRng {
    if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays one exploratory turn: a random legal move, or a pass if none.
fn explore(game: &mut Game, rng: &mut SmallRng) -> Result<Turn, GameError> {
    let grid = game.board().grid();
    let player = game.to_move();
    match random_move(grid, player, rng) {
        Some(mv) => {
            let mv = mv.with_score(score_move(grid, player, mv.kind, mv.to));
            game.play(mv)
        }
        None => game.pass(),
    }
}

/// Plays a single game and records every turn.
pub fn play_game(
    config: &SelfPlayConfig,
    game_id: usize,
    rng: &mut SmallRng,
) -> Result<GameRecord, SelfPlayError> {
    let preset = Preset::by_name(&config.preset)
        .ok_or_else(|| SelfPlayError::UnknownPreset(config.preset.clone()))?;
    let mut game = Game::new(config.size, preset)?;
    let epsilon = config.epsilon.clamp(0.0, 1.0);
    let mut plies = Vec::new();

    while !game.outcome().is_over() && game.ply() < config.max_plies {
        let explored = epsilon > 0.0 && rng.gen_bool(epsilon);
        let turn = if explored {
            explore(&mut game, rng)?
        } else {
            game.step(config.tie_break, rng)?
        };
        let counts = game.board().counts();
        plies.push(PlyRecord {
            ply: turn.ply,
            player: turn.player,
            mv: turn.mv,
            converted: turn.converted,
            explored,
            counts,
            value: evaluate(&counts, turn.player),
        });
    }

    let outcome = game.outcome();
    Ok(GameRecord {
        game_id,
        preset: preset.name.to_string(),
        size: config.size,
        plies,
        outcome,
        finished: outcome.is_over(),
        final_counts: game.board().counts(),
    })
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// Records arrive in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    })?;
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
///
/// This allows the caller to process games incrementally (e.g. write to disk)
/// rather than waiting for all games to finish.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game)
    } else {
        run_self_play_sequential(config, on_game)
    }
}

fn log_game(config: &SelfPlayConfig, n: usize, game: &GameRecord, started: Instant) {
    if config.quiet {
        return;
    }
    info!(
        game = n,
        of = config.num_games,
        outcome = %game.outcome,
        plies = game.plies.len(),
        black = game.final_counts.black,
        white = game.final_counts.white,
        secs = started.elapsed().as_secs_f64(),
        "game finished"
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let started = Instant::now();
        let mut rng = game_rng(config, i);
        let game = play_game(config, i, &mut rng)?;
        log_game(config, i + 1, &game, started);
        on_game(game);
    }
    Ok(())
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F) -> Result<(), SelfPlayError>
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    let (tx, rx) = mpsc::channel::<Result<GameRecord, SelfPlayError>>();
    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let started = Instant::now();
                    let mut rng = game_rng(&config_clone, i);
                    let result = play_game(&config_clone, i, &mut rng);
                    if let Ok(game) = &result {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_game(&config_clone, n, game, started);
                    }
                    let _ = tx.send(result);
                });
        });
    });

    // Receive completed games on the calling thread; keep the first error.
    let mut first_error = None;
    for result in rx {
        match result {
            Ok(game) => on_game(game),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    if let Err(panic) = handle.join() {
        std::panic::resume_unwind(panic);
    }
    first_error.map_or(Ok(()), Err)
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Writes a single game record as a JSON object.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    Ok(())
}

/// Logs a summary of self-play results.
pub fn print_summary(games: &[GameRecord]) {
    let s = Summary::of(games);
    let pct = |n: usize| (1000.0 * n as f64 / s.games.max(1) as f64).round() / 10.0;
    info!(games = s.games, avg_plies = s.avg_plies, "self-play summary");
    info!(
        black = s.black_wins,
        black_pct = pct(s.black_wins),
        white = s.white_wins,
        white_pct = pct(s.white_wins),
        draws = s.draws,
        unfinished = s.unfinished,
        "results"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: 1,
            size: 9,
            preset: "corners".to_string(),
            max_plies: 60,
            threads: 1,
            seed: 42,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn default_config() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.num_games, 10);
        assert_eq!(config.preset, "corners");
        assert_eq!(config.size, 9);
        assert_eq!(config.max_plies, 400);
        assert_eq!(config.tie_break, TieBreak::First);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn play_single_game_records_turns() {
        let config = quick_config();
        let mut rng = SmallRng::seed_from_u64(42);
        let game = play_game(&config, 0, &mut rng).unwrap();

        assert!(!game.plies.is_empty());
        assert!(game.plies.len() <= config.max_plies);
        assert_eq!(game.finished, game.outcome.is_over());
        assert_eq!(game.final_counts.total(), 81);
        for (i, ply) in game.plies.iter().enumerate() {
            assert_eq!(ply.ply, i);
            assert_eq!(ply.counts.total(), 81);
            assert!((-1.0..=1.0).contains(&ply.value));
            assert!(!ply.explored);
        }
        // Players alternate, Black first.
        assert_eq!(game.plies[0].player, Player::Black);
        if game.plies.len() > 1 {
            assert_eq!(game.plies[1].player, Player::White);
        }
    }

    #[test]
    fn first_tie_break_games_are_deterministic() {
        let config = quick_config();
        let a = play_game(&config, 0, &mut SmallRng::seed_from_u64(1)).unwrap();
        let b = play_game(&config, 0, &mut SmallRng::seed_from_u64(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn exploration_marks_random_turns() {
        let config = SelfPlayConfig {
            epsilon: 1.0,
            ..quick_config()
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let game = play_game(&config, 0, &mut rng).unwrap();
        assert!(game.plies.iter().all(|p| p.explored));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = SelfPlayConfig {
            preset: "spiral".to_string(),
            ..quick_config()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            play_game(&config, 0, &mut rng),
            Err(SelfPlayError::UnknownPreset(_))
        ));
    }

    #[test]
    fn preset_larger_than_board_is_an_error() {
        let config = SelfPlayConfig {
            size: 5,
            ..quick_config()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            play_game(&config, 0, &mut rng),
            Err(SelfPlayError::Board(_))
        ));
    }

    #[test]
    fn oversized_board_is_an_error() {
        let config = SelfPlayConfig {
            size: 1 << 32,
            ..quick_config()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            play_game(&config, 0, &mut rng),
            Err(SelfPlayError::Board(BoardError::InvalidSize(_)))
        ));
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let config = SelfPlayConfig {
            num_games: 3,
            ..quick_config()
        };
        let games = run_self_play(&config).unwrap();
        assert_eq!(games.len(), 3);
        let ids: Vec<usize> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let sequential = SelfPlayConfig {
            num_games: 4,
            tie_break: TieBreak::Random,
            epsilon: 0.1,
            seed: 77,
            ..quick_config()
        };
        let parallel = SelfPlayConfig {
            threads: 2,
            ..sequential.clone()
        };
        let a = run_self_play(&sequential).unwrap();
        let mut b = run_self_play(&parallel).unwrap();
        b.sort_by_key(|g| g.game_id);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_run_reports_errors() {
        let config = SelfPlayConfig {
            num_games: 2,
            threads: 2,
            preset: "spiral".to_string(),
            ..quick_config()
        };
        assert!(matches!(
            run_self_play(&config),
            Err(SelfPlayError::UnknownPreset(_))
        ));
    }

    #[test]
    fn jsonl_output_is_valid() {
        let config = SelfPlayConfig {
            num_games: 2,
            ..quick_config()
        };
        let games = run_self_play(&config).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&games, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for (line, game) in lines.iter().zip(&games) {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["game_id"], game.game_id);
            assert_eq!(value["preset"], "corners");
            assert_eq!(value["plies"].as_array().unwrap().len(), game.plies.len());
            let back: GameRecord = serde_json::from_str(line).unwrap();
            assert_eq!(back.final_counts, game.final_counts);
        }
    }

    #[test]
    fn summary_tallies_outcomes() {
        let record = |outcome: Outcome, plies: usize| GameRecord {
            game_id: 0,
            preset: "corners".to_string(),
            size: 9,
            plies: (0..plies)
                .map(|ply| PlyRecord {
                    ply,
                    player: Player::Black,
                    mv: None,
                    converted: 0,
                    explored: false,
                    counts: Counts::all_empty(81),
                    value: 0.0,
                })
                .collect(),
            outcome,
            finished: outcome.is_over(),
            final_counts: Counts::all_empty(81),
        };
        let games = vec![
            record(Outcome::Win(Player::Black), 10),
            record(Outcome::Win(Player::White), 20),
            record(Outcome::Draw, 30),
            record(Outcome::Ongoing, 40),
        ];
        let s = Summary::of(&games);
        assert_eq!(s.games, 4);
        assert_eq!(s.black_wins, 1);
        assert_eq!(s.white_wins, 1);
        assert_eq!(s.draws, 1);
        assert_eq!(s.unfinished, 1);
        assert!((s.avg_plies - 25.0).abs() < 1e-9);
        assert_eq!(Summary::of(&[]), Summary::default());
    }
}
