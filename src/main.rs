//! Assimilate -- an Ataxx-style engine implementing the AUI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`.

use std::io::{self, BufRead};

use tracing::{error, warn};

use assimilate::engine::{Engine, EngineError};
use assimilate::protocol::parser::{parse_command, Command};

/// Runs the main AUI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    if let Err(e) = run() {
        error!(error = %e, "protocol loop aborted");
        std::process::exit(1);
    }
}

fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result = match cmd {
            Command::Aui => engine.handle_aui(&mut out).map_err(EngineError::from),
            Command::IsReady => engine.handle_isready(&mut out).map_err(EngineError::from),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => engine.new_game(),
            Command::Position { preset } => engine.set_position(&preset),
            Command::Go => engine.handle_go(&mut out),
            Command::Move { from, to } => engine.handle_move(from, to, &mut out),
            Command::Show => engine.handle_show(&mut out),
            Command::Judge => engine.handle_judge(&mut out),
            Command::Quit => break,
        };

        match result {
            Ok(()) => {}
            Err(EngineError::Io(e)) => return Err(e),
            Err(e) => warn!(error = %e, command = line.trim(), "command rejected"),
        }
    }
    Ok(())
}
