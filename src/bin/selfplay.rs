//! Self-play game generation CLI.
//!
//! Plays advisor-vs-advisor games and writes the records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};

use assimilate::search::TieBreak;
use assimilate::selfplay::{self, GameRecord, SelfPlayConfig};

#[derive(Parser, Debug)]
#[command(
    name = "selfplay",
    version,
    about = "Play advisor-vs-advisor games and write them as JSONL"
)]
struct Cli {
    /// Number of games to play
    #[arg(long = "games", default_value_t = 10)]
    games: usize,
    /// Starting preset (corners or cross)
    #[arg(long, default_value = "corners")]
    preset: String,
    /// Board side length
    #[arg(long, default_value_t = 9)]
    size: usize,
    /// Turns after which an undecided game is abandoned
    #[arg(long = "max-plies", default_value_t = 400)]
    max_plies: usize,
    /// Tie-break among equally scored moves (first or random)
    #[arg(long = "tie-break", default_value = "first")]
    tie_break: TieBreak,
    /// Probability of playing a random legal move instead of the advised one
    #[arg(long, default_value_t = 0.0)]
    epsilon: f64,
    /// Number of parallel threads
    #[arg(long, default_value_t = 4)]
    threads: usize,
    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
    /// Suppress progress and summary output
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: self.games,
            preset: self.preset.clone(),
            size: self.size,
            max_plies: self.max_plies,
            tie_break: self.tie_break,
            epsilon: self.epsilon,
            threads: self.threads,
            seed: self.seed,
            quiet: self.quiet,
        }
    }
}

fn write_output(path: Option<&PathBuf>, games: &[GameRecord]) -> io::Result<()> {
    let mut writer: Box<dyn Write> = match path {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    selfplay::write_jsonl(games, &mut writer)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let config = cli.config();

    if !config.quiet {
        info!(
            games = config.num_games,
            preset = %config.preset,
            size = config.size,
            max_plies = config.max_plies,
            tie_break = %config.tie_break,
            epsilon = config.epsilon,
            threads = config.threads,
            "starting self-play"
        );
    }

    let start = Instant::now();
    let mut games = match selfplay::run_self_play(&config) {
        Ok(games) => games,
        Err(e) => {
            error!(error = %e, "self-play failed");
            return ExitCode::FAILURE;
        }
    };
    games.sort_by_key(|g| g.game_id);

    if !config.quiet {
        let elapsed = start.elapsed().as_secs_f64();
        info!(
            games = games.len(),
            secs = elapsed,
            games_per_hour = games.len() as f64 / elapsed.max(f64::EPSILON) * 3600.0,
            "completed"
        );
        selfplay::print_summary(&games);
    }

    if let Err(e) = write_output(cli.output.as_ref(), &games) {
        error!(error = %e, "failed to write output");
        return ExitCode::FAILURE;
    }
    if let (Some(path), false) = (&cli.output, config.quiet) {
        info!(games = games.len(), path = %path.display(), "wrote records");
    }
    ExitCode::SUCCESS
}
