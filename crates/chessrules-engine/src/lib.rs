//! Chess rules engine: board state, legal move generation and game state
//! classification.
//!
//! This crate provides:
//! - [`Board`] - occupancy plus the auxiliary state needed for castling,
//!   en passant and the draw rules, mutated only through [`Board::reset`] and
//!   [`Board::apply_move`]
//! - [`SquareSet`] - the set of legal destinations for one piece
//! - [`History`] - append-only snapshots of the board after every move
//! - [`GameState`] - check, checkmate and stalemate classification
//! - [`DiagnosticSink`] - where the engine reports applied and rejected moves
//!
//! # Legality
//!
//! Candidate destinations are generated from each piece's movement geometry
//! and kept only if a what-if move on a scratch snapshot leaves the mover's
//! king unattacked. Queries never modify the board.
//!
//! # Example
//!
//! ```
//! use chessrules_core::{Color, Square};
//! use chessrules_engine::{Board, GameState};
//!
//! let mut board = Board::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//!
//! assert!(board.legal_destinations(e2, Color::White).contains(e4));
//! assert!(board.apply_move(e2, e4, Color::White));
//! assert_eq!(board.en_passant(), Square::from_algebraic("e3"));
//! assert_eq!(board.checkmate_state(Color::Black), GameState::None);
//! ```

mod board;
mod diagnostics;
mod error;
mod game;
pub mod movegen;
mod square_set;
mod view;

pub use board::{Board, Corner, MovedFlags, Occupant};
pub use diagnostics::{DiagnosticSink, NullSink, Severity, TracingSink};
pub use error::EngineError;
pub use game::{GameState, FIFTY_MOVE_TURNS, REPETITION_MIN_TURNS};
pub use square_set::{SquareSet, SquareSetIter};
pub use view::{BoardView, History, HistoryIndex, Occupancy};
