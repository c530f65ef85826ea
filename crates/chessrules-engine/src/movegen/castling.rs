//! Castling eligibility.

use super::leaves_king_safe;
use crate::board::{king_home, Corner};
use crate::Board;
use chessrules_core::{Color, File, Piece, Square};

/// The king's landing square when castling.
pub(crate) fn king_target(color: Color, queen_side: bool) -> Square {
    let file = if queen_side { File::C } else { File::G };
    Square::new(file, color.back_rank())
}

/// Squares the king crosses and lands on, in order.
fn king_path(color: Color, queen_side: bool) -> [Square; 2] {
    let rank = color.back_rank();
    if queen_side {
        [Square::new(File::D, rank), Square::new(File::C, rank)]
    } else {
        [Square::new(File::F, rank), Square::new(File::G, rank)]
    }
}

impl Board {
    /// Returns true if `color` may castle on the given side right now.
    ///
    /// Requires that neither the king nor that corner's rook has moved, the
    /// rook still stands on its corner, every square between them is empty,
    /// and the king is not in check on its home, crossing or landing square.
    pub fn can_castle(&self, color: Color, queen_side: bool) -> bool {
        let corner = Corner { color, queen_side };
        let moved = self.moved_flags();
        if moved.king_moved(color) || moved.rook_moved(corner) {
            return false;
        }

        let home = king_home(color);
        if self.king_square(color) != home {
            return false;
        }
        if self.piece_at(corner.square()) != Some((Piece::Rook, color)) {
            return false;
        }

        let path = king_path(color, queen_side);
        if path.iter().any(|&sq| self.piece_at(sq).is_some()) {
            return false;
        }
        if queen_side && self.piece_at(Square::new(File::B, color.back_rank())).is_some() {
            return false;
        }

        if self.is_checked(color) {
            return false;
        }
        let mut scratch = *self.latest_view();
        path.iter()
            .all(|&step| leaves_king_safe(&mut scratch, home, home, step, None, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(board: &mut Board, moves: &[&str]) {
        let mut color = Color::White;
        for m in moves {
            assert!(
                board.apply_move(sq(&m[0..2]), sq(&m[2..4]), color),
                "{} {} should be legal",
                color,
                m
            );
            color = color.opposite();
        }
    }

    /// White's king side cleared: e4, Nf3, Be2.
    const CLEAR_KINGSIDE: [&str; 6] = ["e2e4", "a7a6", "g1f3", "a6a5", "f1e2", "h7h6"];

    #[test]
    fn not_available_at_start() {
        let board = Board::new();
        for color in Color::ALL {
            assert!(!board.can_castle(color, false));
            assert!(!board.can_castle(color, true));
        }
    }

    #[test]
    fn kingside_castle_moves_the_rook() {
        let mut board = Board::new();
        play(&mut board, &CLEAR_KINGSIDE);
        assert!(board.can_castle(Color::White, false));
        assert!(!board.can_castle(Color::White, true));
        assert!(board.legal_destinations(Square::E1, Color::White).contains(Square::G1));

        assert!(board.apply_move(Square::E1, Square::G1, Color::White));
        assert_eq!(board.piece_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.piece_at(Square::E1), None);
        assert_eq!(board.king_square(Color::White), Square::G1);
        assert_eq!(board.move_count(Square::F1), Some(1));
    }

    #[test]
    fn castled_king_is_not_flagged_as_moved() {
        let mut board = Board::new();
        play(&mut board, &CLEAR_KINGSIDE);
        assert!(board.apply_move(Square::E1, Square::G1, Color::White));

        let flags = board.moved_flags();
        assert!(!flags.king_moved(Color::White));
        assert!(flags.rook_moved(Corner { color: Color::White, queen_side: false }));
        // The king is off its home square, so castling stays unavailable.
        assert!(!board.can_castle(Color::White, false));
        assert!(!board.can_castle(Color::White, true));
    }

    #[test]
    fn queenside_castle() {
        let mut board = Board::new();
        play(
            &mut board,
            &["d2d4", "a7a6", "b1c3", "a6a5", "c1f4", "b7b6", "d1d2", "b6b5"],
        );
        assert!(board.can_castle(Color::White, true));
        assert!(board.apply_move(Square::E1, Square::C1, Color::White));
        assert_eq!(board.piece_at(Square::C1), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(Square::D1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(Square::A1), None);
    }

    #[test]
    fn queenside_needs_b_file_clear() {
        let mut board = Board::new();
        play(
            &mut board,
            &["d2d4", "a7a6", "c1f4", "a6a5", "d1d2", "b7b6"],
        );
        // Knight still on b1.
        assert!(!board.can_castle(Color::White, true));
    }

    #[test]
    fn king_move_forfeits_castling() {
        let mut board = Board::new();
        play(&mut board, &CLEAR_KINGSIDE);
        play_as(&mut board, Color::White, "e1f1");
        play_as(&mut board, Color::Black, "h6h5");
        play_as(&mut board, Color::White, "f1e1");
        play_as(&mut board, Color::Black, "h5h4");
        assert!(board.moved_flags().king_moved(Color::White));
        assert!(!board.can_castle(Color::White, false));
    }

    #[test]
    fn rook_move_forfeits_that_side_only() {
        let mut board = Board::new();
        play(&mut board, &CLEAR_KINGSIDE);
        play_as(&mut board, Color::White, "h1f1");
        play_as(&mut board, Color::Black, "h6h5");
        play_as(&mut board, Color::White, "f1h1");
        play_as(&mut board, Color::Black, "h5h4");
        assert!(board
            .moved_flags()
            .rook_moved(Corner { color: Color::White, queen_side: false }));
        assert!(!board.can_castle(Color::White, false));
        assert!(!board.moved_flags().king_moved(Color::White));
    }

    #[test]
    fn cannot_castle_through_an_attacked_square() {
        let mut board = Board::new();
        play(
            &mut board,
            &["e2e4", "b7b6", "g1f3", "c8a6", "g2g3", "e7e6", "f1g2", "h7h6"],
        );
        // The bishop on a6 covers f1.
        assert!(!board.can_castle(Color::White, false));
        assert!(!board.legal_destinations(Square::E1, Color::White).contains(Square::G1));
    }

    #[test]
    fn cannot_castle_out_of_check() {
        let mut board = Board::new();
        play(
            &mut board,
            &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "d2d3", "f8b4"],
        );
        assert!(board.is_checked(Color::White));
        assert!(!board.can_castle(Color::White, false));
    }

    #[test]
    fn king_target_squares() {
        assert_eq!(king_target(Color::White, false), Square::G1);
        assert_eq!(king_target(Color::White, true), Square::C1);
        assert_eq!(king_target(Color::Black, false), Square::G8);
        assert_eq!(king_target(Color::Black, true), Square::C8);
    }

    fn play_as(board: &mut Board, color: Color, m: &str) {
        assert!(
            board.apply_move(sq(&m[0..2]), sq(&m[2..4]), color),
            "{} {} should be legal",
            color,
            m
        );
    }
}
