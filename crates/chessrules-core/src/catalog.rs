//! Static movement geometry and starting layout for each piece kind.
//!
//! Directions are `(d_rank, d_file)` pairs. Pawns have no entry here: their
//! forward direction depends on color and their captures differ from their
//! advances, so the legality engine handles them separately.

use crate::{Color, File, Piece, Rank, Square};

/// A single step as `(d_rank, d_file)`.
pub type Direction = (i8, i8);

/// Rank- and file-aligned steps.
pub const ORTHOGONAL: [Direction; 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Diagonal steps.
pub const DIAGONAL: [Direction; 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// All eight neighbouring steps.
pub const ROYAL: [Direction; 8] = [
    (1, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
];

/// L-shaped knight jumps.
pub const KNIGHT: [Direction; 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Returns the step directions for a piece kind. Empty for pawns.
pub const fn directions(piece: Piece) -> &'static [Direction] {
    match piece {
        Piece::Pawn => &[],
        Piece::Rook => &ORTHOGONAL,
        Piece::Knight => &KNIGHT,
        Piece::Bishop => &DIAGONAL,
        Piece::Queen | Piece::King => &ROYAL,
    }
}

/// Returns true if the piece repeats its step until blocked.
#[inline]
pub const fn can_slide(piece: Piece) -> bool {
    piece.can_slide()
}

const fn sq(file: File, rank: Rank) -> Square {
    Square::new(file, rank)
}

const WHITE_PAWNS: [Square; 8] = [
    sq(File::A, Rank::R2),
    sq(File::B, Rank::R2),
    sq(File::C, Rank::R2),
    sq(File::D, Rank::R2),
    sq(File::E, Rank::R2),
    sq(File::F, Rank::R2),
    sq(File::G, Rank::R2),
    sq(File::H, Rank::R2),
];

const BLACK_PAWNS: [Square; 8] = [
    sq(File::A, Rank::R7),
    sq(File::B, Rank::R7),
    sq(File::C, Rank::R7),
    sq(File::D, Rank::R7),
    sq(File::E, Rank::R7),
    sq(File::F, Rank::R7),
    sq(File::G, Rank::R7),
    sq(File::H, Rank::R7),
];

/// Returns the standard starting squares for a piece kind and color.
pub const fn start_squares(piece: Piece, color: Color) -> &'static [Square] {
    match (piece, color) {
        (Piece::Pawn, Color::White) => &WHITE_PAWNS,
        (Piece::Pawn, Color::Black) => &BLACK_PAWNS,
        (Piece::Rook, Color::White) => &[Square::A1, Square::H1],
        (Piece::Rook, Color::Black) => &[Square::A8, Square::H8],
        (Piece::Knight, Color::White) => &[Square::B1, Square::G1],
        (Piece::Knight, Color::Black) => &[Square::B8, Square::G8],
        (Piece::Bishop, Color::White) => &[Square::C1, Square::F1],
        (Piece::Bishop, Color::Black) => &[Square::C8, Square::F8],
        (Piece::Queen, Color::White) => &[Square::D1],
        (Piece::Queen, Color::Black) => &[Square::D8],
        (Piece::King, Color::White) => &[Square::E1],
        (Piece::King, Color::Black) => &[Square::E8],
    }
}
