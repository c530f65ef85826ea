//! Engine error taxonomy.
//!
//! Illegal moves are not errors; [`Board::apply_move`](crate::Board::apply_move)
//! reports them as `false`.

use chessrules_core::{Color, Square};
use thiserror::Error;

/// Conditions the engine reports through its diagnostic sink.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A history query named a snapshot that does not exist. Recoverable.
    #[error("history index {index} exceeds number of records ({len})")]
    HistoryOutOfRange { index: usize, len: usize },

    /// A snapshot holds no king of the given color.
    #[error("no {color} king on the board")]
    KingNotFound { color: Color },

    /// The cached king square does not hold that color's king.
    #[error("cached {color} king square {square} does not hold the king")]
    KingCacheOutOfSync { color: Color, square: Square },

    /// The history is empty although the board has been reset.
    #[error("board history is empty")]
    EmptyHistory,
}
