//! Core types for the chess rules engine.
//!
//! This crate provides the value types shared across the workspace:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] for coordinate moves typed by a player
//! - [`catalog`], the static movement geometry and starting layout

pub mod catalog;
mod color;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use mov::{parse_square, Move, ParseError};
pub use piece::Piece;
pub use square::{File, Rank, Square};
