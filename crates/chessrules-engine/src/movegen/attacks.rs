//! Check detection by ray casting from the king's square.

use crate::view::BoardView;
use chessrules_core::catalog::{DIAGONAL, KNIGHT, ORTHOGONAL, ROYAL};
use chessrules_core::{Color, Piece, Square};

/// Returns the first occupant met walking from `from` along `(d_rank, d_file)`.
fn first_along(view: &BoardView, from: Square, d_rank: i8, d_file: i8) -> Option<(Piece, Color)> {
    let mut cursor = from;
    while let Some(next) = cursor.offset(d_rank, d_file) {
        if let Some(occupant) = view.get(next) {
            return Some(occupant);
        }
        cursor = next;
    }
    None
}

/// Returns true if a piece of `color`'s opponent attacks `target`.
///
/// Checked in order: sliders along rank/file and diagonal rays, knights,
/// pawns, then the opposing king.
pub fn is_attacked(view: &BoardView, target: Square, color: Color) -> bool {
    let them = color.opposite();

    for &(dr, df) in &ORTHOGONAL {
        if let Some((piece, owner)) = first_along(view, target, dr, df) {
            if owner == them && matches!(piece, Piece::Rook | Piece::Queen) {
                return true;
            }
        }
    }
    for &(dr, df) in &DIAGONAL {
        if let Some((piece, owner)) = first_along(view, target, dr, df) {
            if owner == them && matches!(piece, Piece::Bishop | Piece::Queen) {
                return true;
            }
        }
    }

    let holds = |dr: i8, df: i8, piece: Piece| {
        target
            .offset(dr, df)
            .is_some_and(|sq| view.get(sq) == Some((piece, them)))
    };

    if KNIGHT.iter().any(|&(dr, df)| holds(dr, df, Piece::Knight)) {
        return true;
    }

    // Enemy pawns sit one rank ahead of the target from `color`'s side.
    let forward = color.pawn_direction();
    if holds(forward, -1, Piece::Pawn) || holds(forward, 1, Piece::Pawn) {
        return true;
    }

    ROYAL.iter().any(|&(dr, df)| holds(dr, df, Piece::King))
}
