//! Game state classification.
//!
//! Terminal states are derived from the legal destination counts of one side.
//! Repetition and the fifty-move rule are independent of that classification
//! and are driven by the pawnless-turn counter.

use crate::Board;
use chessrules_core::Color;
use std::fmt;

/// Fewest pawnless half-moves in which a position can occur three times.
pub const REPETITION_MIN_TURNS: u32 = 12;

/// Pawnless half-moves after which the fifty-move rule is due.
pub const FIFTY_MOVE_TURNS: u32 = 50;

/// Classification of a position from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// The side has moves and is not in check.
    #[default]
    None,
    /// The side is in check but can escape.
    InCheck,
    /// The side is in check with no legal move.
    Checkmate,
    /// The side is not in check and has no legal move.
    Stalemate,
}

impl GameState {
    /// Returns true for checkmate and stalemate.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::None => "none",
            GameState::InCheck => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

impl Board {
    /// Classifies the latest position for `color`.
    pub fn checkmate_state(&self, color: Color) -> GameState {
        let checked = self.is_checked(color);
        let state = match (self.legal_move_count(color), checked) {
            (0, true) => GameState::Checkmate,
            (0, false) => GameState::Stalemate,
            (_, true) => GameState::InCheck,
            (_, false) => GameState::None,
        };
        tracing::debug!(%color, %state, "classified position");
        state
    }

    /// Returns true once the latest snapshot has occurred three times within
    /// the current pawnless stretch.
    pub fn threefold_repetition(&self) -> bool {
        let turns = self.pawnless_turns();
        if turns < REPETITION_MIN_TURNS {
            return false;
        }
        self.history().occurrences_of_latest(turns as usize) >= 3
    }

    /// Returns true once fifty pawnless half-moves have been played.
    pub fn due_fifty_moves_rule(&self) -> bool {
        self.pawnless_turns() >= FIFTY_MOVE_TURNS
    }
}
