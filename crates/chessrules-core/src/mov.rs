//! Coordinate move representation and parsing.

use crate::Square;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when parsing user-typed coordinates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid move: expected two squares like 'e2e4', got '{0}'")]
    InvalidMove(String),
}

/// Parses a single square, reporting the offending text on failure.
pub fn parse_square(s: &str) -> Result<Square, ParseError> {
    let trimmed = s.trim();
    Square::from_algebraic(trimmed).ok_or_else(|| ParseError::InvalidSquare(trimmed.to_string()))
}

/// A from/to square pair. Castling is expressed as the king's two-file move
/// (e.g. `e1g1`), en passant as the capturing pawn's diagonal step.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Creates a move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Parses coordinate notation: `e2e4`, `e2-e4` or `e2 e4`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return Err(ParseError::InvalidMove(s.trim().to_string()));
        }
        let from = parse_square(&compact[0..2])?;
        let to = parse_square(&compact[2..4])?;
        Ok(Move { from, to })
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{})", self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
