//! AUI command parser.
//!
//! Parses incoming protocol lines into structured `Command` variants that
//! the main loop dispatches on.

use tracing::warn;

use crate::board::Coord;

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Aui,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game from the default preset.
    NewGame,

    /// Start a new game from a named preset.
    Position { preset: String },

    /// Ask for the advisor's move for the side to move.
    Go,

    /// Play a move for the side to move: `move <x,y> <x,y>`.
    Move { from: Coord, to: Coord },

    /// Print the board, counts and side to move.
    Show,

    /// Print the current outcome.
    Judge,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "aui" => Some(Command::Aui),
        "isready" => Some(Command::IsReady),
        "newgame" => Some(Command::NewGame),
        "go" => Some(Command::Go),
        "show" => Some(Command::Show),
        "judge" => Some(Command::Judge),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "position" => parse_position(args),
        "move" => parse_move(args),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let rest = &args[1..];
    let (name_parts, value_parts) = match rest.iter().position(|&t| t == "value") {
        Some(vi) => (&rest[..vi], &rest[vi + 1..]),
        None => (rest, &rest[rest.len()..]),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };
    Some(Command::SetOption { name, value })
}

/// Parses `position <preset>`.
fn parse_position(args: &[&str]) -> Option<Command> {
    match args {
        [preset] => Some(Command::Position {
            preset: preset.to_string(),
        }),
        _ => {
            warn!("malformed position: expected 'position <preset>'");
            None
        }
    }
}

/// Parses `move <x,y> <x,y>`.
fn parse_move(args: &[&str]) -> Option<Command> {
    let [from, to] = args else {
        warn!("malformed move: expected 'move <x,y> <x,y>'");
        return None;
    };
    match (from.parse::<Coord>(), to.parse::<Coord>()) {
        (Ok(from), Ok(to)) => Some(Command::Move { from, to }),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "malformed move");
            None
        }
    }
}
