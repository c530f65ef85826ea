//! Text rendering of boards and destination sets.

use chessrules_core::Square;
use chessrules_engine::{BoardView, SquareSet};
use std::fmt::Write;

/// Renders a snapshot, rank 8 on top.
pub fn board(view: &BoardView, coordinates: bool) -> String {
    if coordinates {
        return view.to_string();
    }
    grid(|sq| {
        view.get(sq)
            .map_or('.', |(piece, color)| piece.to_char(color))
    })
}

/// Renders a destination set with `X` on member squares.
pub fn destinations(set: SquareSet, coordinates: bool) -> String {
    if coordinates {
        return set.to_string();
    }
    grid(|sq| if set.contains(sq) { 'X' } else { '.' })
}

fn grid(cell: impl Fn(Square) -> char) -> String {
    let mut out = String::with_capacity(8 * 17);
    for rank in (0..8u8).rev() {
        for file in 0..8u8 {
            if let Some(sq) = Square::from_coords(rank, file) {
                if file > 0 {
                    out.push(' ');
                }
                out.push(cell(sq));
            }
        }
        if rank > 0 {
            out.push('\n');
        }
    }
    out
}

/// One-line summary of a square list, e.g. `e3 e4`.
pub fn square_list(set: SquareSet) -> String {
    let mut out = String::new();
    for (i, sq) in set.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", sq);
    }
    out
}
