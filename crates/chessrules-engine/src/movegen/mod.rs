//! Legal destination generation.
//!
//! Every candidate square is tested with a what-if move on a scratch copy of
//! the latest snapshot; a candidate is kept only if the mover's king is not
//! attacked afterwards.

pub mod attacks;
mod castling;
pub(crate) mod simulate;

use crate::view::BoardView;
use crate::{Board, SquareSet};
use chessrules_core::{catalog, Color, Piece, Square};
use simulate::Simulation;

/// Returns true if moving `from` to `to` (and clearing `victim`, the pawn
/// taken en passant) leaves `color`'s king unattacked.
fn leaves_king_safe(
    scratch: &mut BoardView,
    king: Square,
    from: Square,
    to: Square,
    victim: Option<Square>,
    color: Color,
) -> bool {
    let king_after = if from == king { to } else { king };
    let sim = Simulation::relocate(scratch, from, to, victim);
    !attacks::is_attacked(&sim, king_after, color)
}

impl Board {
    /// Returns every square the piece on `from` may legally move to when
    /// played by `color`. Empty if the square is empty or holds the other
    /// color's piece.
    pub fn legal_destinations(&self, from: Square, color: Color) -> SquareSet {
        let mut destinations = SquareSet::EMPTY;
        let Some((piece, owner)) = self.piece_at(from) else {
            return destinations;
        };
        if owner != color {
            return destinations;
        }

        let king = self.verified_king(color);
        let mut scratch = *self.latest_view();

        if piece == Piece::Pawn {
            self.pawn_destinations(&mut scratch, king, from, color, &mut destinations);
        } else {
            for &(dr, df) in catalog::directions(piece) {
                let mut cursor = from;
                while let Some(target) = cursor.offset(dr, df) {
                    match scratch.get(target) {
                        None => {
                            if leaves_king_safe(&mut scratch, king, from, target, None, color) {
                                destinations.insert(target);
                            }
                        }
                        Some((_, other)) if other != color => {
                            if leaves_king_safe(&mut scratch, king, from, target, None, color) {
                                destinations.insert(target);
                            }
                            break;
                        }
                        Some(_) => break,
                    }
                    if !catalog::can_slide(piece) {
                        break;
                    }
                    cursor = target;
                }
            }
        }

        if piece == Piece::King {
            for queen_side in [false, true] {
                if self.can_castle(color, queen_side) {
                    destinations.insert(castling::king_target(color, queen_side));
                }
            }
        }

        tracing::trace!(%from, %color, count = destinations.len(), "legal destinations");
        destinations
    }

    fn pawn_destinations(
        &self,
        scratch: &mut BoardView,
        king: Square,
        from: Square,
        color: Color,
        destinations: &mut SquareSet,
    ) {
        let forward = color.pawn_direction();

        if let Some(one) = from.offset(forward, 0) {
            // The double step needs the crossed square empty and safe too.
            if scratch.get(one).is_none()
                && leaves_king_safe(scratch, king, from, one, None, color)
            {
                destinations.insert(one);
                if from.rank() == color.pawn_rank() {
                    if let Some(two) = one.offset(forward, 0) {
                        if scratch.get(two).is_none()
                            && leaves_king_safe(scratch, king, from, two, None, color)
                        {
                            destinations.insert(two);
                        }
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(diagonal) = from.offset(forward, side) else {
                continue;
            };
            match scratch.get(diagonal) {
                Some((_, other)) if other != color => {
                    if leaves_king_safe(scratch, king, from, diagonal, None, color) {
                        destinations.insert(diagonal);
                    }
                }
                None if self.en_passant() == Some(diagonal) => {
                    let victim = Square::new(diagonal.file(), from.rank());
                    if scratch.get(victim) == Some((Piece::Pawn, color.opposite()))
                        && leaves_king_safe(scratch, king, from, diagonal, Some(victim), color)
                    {
                        destinations.insert(diagonal);
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns true if `color`'s king is attacked in the latest snapshot.
    pub fn is_checked(&self, color: Color) -> bool {
        let king = self.verified_king(color);
        attacks::is_attacked(self.latest_view(), king, color)
    }

    /// Total number of legal destinations over all of `color`'s pieces.
    pub fn legal_move_count(&self, color: Color) -> usize {
        Square::all()
            .filter(|&sq| matches!(self.piece_at(sq), Some((_, owner)) if owner == color))
            .map(|sq| self.legal_destinations(sq, color).len())
            .sum()
    }
}
