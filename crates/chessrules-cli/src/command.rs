//! Console command parsing.

use chessrules_core::{parse_square, Move, ParseError, Square};
use chessrules_engine::HistoryIndex;
use thiserror::Error;

/// Errors for lines that name a known command but cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("'{0}' expects {1}")]
    MissingArgument(&'static str, &'static str),

    #[error("invalid history index: '{0}'")]
    InvalidIndex(String),
}

/// Commands typed at the console prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move for the side to move.
    Play(Move),
    /// Show the legal destinations of a piece.
    Moves(Square),
    /// Show a recorded snapshot.
    History(HistoryIndex),
    /// Show the current board.
    Board,
    /// Start a new game.
    Reset,
    Help,
    Quit,
    /// Blank line.
    Empty,
    /// Unrecognized input.
    Unknown(String),
}

impl Command {
    /// Parses one input line.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd.to_ascii_lowercase().as_str() {
            "" => Ok(Command::Empty),
            "board" => Ok(Command::Board),
            "reset" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "moves" => {
                let square = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("moves", "a square like 'e2'"))?;
                Ok(Command::Moves(parse_square(square)?))
            }
            "history" => match parts.next() {
                None => Ok(Command::History(HistoryIndex::Latest)),
                Some(index) => index
                    .parse::<isize>()
                    .map(|n| Command::History(HistoryIndex::from(n)))
                    .map_err(|_| CommandError::InvalidIndex(index.to_string())),
            },
            _ if looks_like_square(cmd) => Ok(Command::Play(Move::parse(input)?)),
            _ => Ok(Command::Unknown(input.to_string())),
        }
    }
}

/// A file letter followed by a rank digit starts move input.
fn looks_like_square(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('a'..='h' | 'A'..='H'), Some('1'..='8'))
    )
}

/// Text printed by `help`.
pub const HELP: &str = "\
commands:
  e2e4 | e2-e4 | e2 e4   move a piece for the side to move
  moves <square>         show the legal destinations of a piece
  history [n]            show snapshot n (0 = start, omitted = latest)
  board                  show the current board
  reset                  start a new game
  help                   show this text
  quit                   leave";
