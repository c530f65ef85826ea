//! Board state: occupancy, auxiliary rule state, and move application.

use std::fmt;
use std::sync::Arc;

use chessrules_core::{catalog, Color, File, Piece, Square};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::view::{BoardView, History, HistoryIndex};
use crate::EngineError;

/// A piece standing on the board, with the number of moves it has made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub piece: Piece,
    pub color: Color,
    pub moves: u16,
}

impl Occupant {
    fn new(piece: Piece, color: Color) -> Self {
        Occupant {
            piece,
            color,
            moves: 0,
        }
    }
}

/// One of the four rook starting corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub color: Color,
    pub queen_side: bool,
}

impl Corner {
    /// Returns the corner at `sq`, if it is one.
    pub const fn at(sq: Square) -> Option<Corner> {
        match sq {
            Square::A1 => Some(Corner { color: Color::White, queen_side: true }),
            Square::H1 => Some(Corner { color: Color::White, queen_side: false }),
            Square::A8 => Some(Corner { color: Color::Black, queen_side: true }),
            Square::H8 => Some(Corner { color: Color::Black, queen_side: false }),
            _ => None,
        }
    }

    /// The corner's square.
    pub const fn square(self) -> Square {
        match (self.color, self.queen_side) {
            (Color::White, true) => Square::A1,
            (Color::White, false) => Square::H1,
            (Color::Black, true) => Square::A8,
            (Color::Black, false) => Square::H8,
        }
    }

    const fn flag(self) -> u8 {
        match (self.color, self.queen_side) {
            (Color::White, true) => MovedFlags::WHITE_QUEENSIDE_ROOK,
            (Color::White, false) => MovedFlags::WHITE_KINGSIDE_ROOK,
            (Color::Black, true) => MovedFlags::BLACK_QUEENSIDE_ROOK,
            (Color::Black, false) => MovedFlags::BLACK_KINGSIDE_ROOK,
        }
    }
}

/// "Has moved" flags gating castling. Flags are only ever set, never cleared,
/// until the board is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovedFlags(u8);

impl MovedFlags {
    pub const NONE: MovedFlags = MovedFlags(0);
    pub const WHITE_KING: u8 = 0b00_0001;
    pub const BLACK_KING: u8 = 0b00_0010;
    pub const WHITE_QUEENSIDE_ROOK: u8 = 0b00_0100;
    pub const WHITE_KINGSIDE_ROOK: u8 = 0b00_1000;
    pub const BLACK_QUEENSIDE_ROOK: u8 = 0b01_0000;
    pub const BLACK_KINGSIDE_ROOK: u8 = 0b10_0000;

    const fn king_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    /// Returns true if the king of `color` has made a non-castling move.
    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        self.0 & Self::king_flag(color) != 0
    }

    /// Returns true if a rook has left the given corner.
    #[inline]
    pub const fn rook_moved(self, corner: Corner) -> bool {
        self.0 & corner.flag() != 0
    }

    #[inline]
    fn mark_king(&mut self, color: Color) {
        self.0 |= Self::king_flag(color);
    }

    #[inline]
    fn mark_rook(&mut self, corner: Corner) {
        self.0 |= corner.flag();
    }
}

/// The king's home square for a color.
pub(crate) const fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// For a king moving two files from its home square, returns the rook's
/// (from, to) squares.
pub(crate) fn castling_rook_move(from: Square, to: Square, color: Color) -> Option<(Square, Square)> {
    if from != king_home(color) || to.rank() != from.rank() {
        return None;
    }
    let rank = color.back_rank();
    match to.file() {
        File::G => Some((Square::new(File::H, rank), Square::new(File::F, rank))),
        File::C => Some((Square::new(File::A, rank), Square::new(File::D, rank))),
        _ => None,
    }
}

/// A chess board for one game.
///
/// All mutation goes through [`Board::reset`] and [`Board::apply_move`]; the
/// cached king squares, en-passant target, castling flags and history are
/// updated there and nowhere else.
#[derive(Clone)]
pub struct Board {
    squares: [Option<Occupant>; 64],
    removed: Vec<Occupant>,
    kings: [Square; 2],
    en_passant: Option<Square>,
    moved: MovedFlags,
    pawnless_turns: u32,
    history: History,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Board {
    /// Creates a board in the starting position, logging through `tracing`.
    pub fn new() -> Self {
        Self::with_diagnostics(Arc::new(TracingSink))
    }

    /// Creates a board in the starting position with a caller-supplied sink.
    pub fn with_diagnostics(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        let mut board = Board {
            squares: [None; 64],
            removed: Vec::new(),
            kings: [king_home(Color::White), king_home(Color::Black)],
            en_passant: None,
            moved: MovedFlags::NONE,
            pawnless_turns: 0,
            history: History::new(),
            diagnostics,
        };
        board.reset();
        board
    }

    /// Restores the standard starting position and clears all game state.
    pub fn reset(&mut self) {
        self.squares = [None; 64];
        for color in Color::ALL {
            for piece in Piece::ALL {
                for &sq in catalog::start_squares(piece, color) {
                    self.squares[sq.index() as usize] = Some(Occupant::new(piece, color));
                }
            }
        }
        self.removed.clear();
        self.kings = [king_home(Color::White), king_home(Color::Black)];
        self.en_passant = None;
        self.moved = MovedFlags::NONE;
        self.pawnless_turns = 0;
        self.history.clear();
        self.history.push(self.view());
        self.diagnostics.info("board reset to the starting position");
    }

    /// Returns the piece kind and color on a square, or `None` if empty.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.occupant(sq).map(|o| (o.piece, o.color))
    }

    /// Returns the full occupant of a square.
    #[inline]
    pub fn occupant(&self, sq: Square) -> Option<&Occupant> {
        self.squares[sq.index() as usize].as_ref()
    }

    /// Number of moves the piece on `sq` has made.
    pub fn move_count(&self, sq: Square) -> Option<u16> {
        self.occupant(sq).map(|o| o.moves)
    }

    /// Captured pieces, in capture order.
    pub fn removed(&self) -> &[Occupant] {
        &self.removed
    }

    /// The cached square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    /// The square a pawn may capture onto en passant this move, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Castling "has moved" flags.
    #[inline]
    pub fn moved_flags(&self) -> MovedFlags {
        self.moved
    }

    /// Consecutive half-moves without a pawn move.
    #[inline]
    pub fn pawnless_turns(&self) -> u32 {
        self.pawnless_turns
    }

    /// All snapshots since the last reset.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns a recorded snapshot. An index past the end is reported to the
    /// diagnostic sink and yields `None`.
    pub fn history_view(&self, index: impl Into<HistoryIndex>) -> Option<&BoardView> {
        let index = index.into();
        let view = self.history.get(index);
        if view.is_none() {
            let err = match index {
                HistoryIndex::At(i) => EngineError::HistoryOutOfRange {
                    index: i,
                    len: self.history.len(),
                },
                HistoryIndex::Latest => EngineError::EmptyHistory,
            };
            self.diagnostics.error(&err.to_string());
        }
        view
    }

    /// A snapshot of the live occupancy.
    pub fn view(&self) -> BoardView {
        let mut view = BoardView::EMPTY;
        for sq in Square::all() {
            view.set(sq, self.piece_at(sq));
        }
        view
    }

    /// The most recent snapshot, which check detection runs against.
    pub(crate) fn latest_view(&self) -> &BoardView {
        match self.history.latest() {
            Some(view) => view,
            None => self.fault(EngineError::EmptyHistory),
        }
    }

    /// Returns `color`'s cached king square after checking that the latest
    /// snapshot really holds that king there. A mismatch is a fault: the
    /// snapshot is scanned to tell a stale cache from a missing king.
    pub(crate) fn verified_king(&self, color: Color) -> Square {
        let square = self.king_square(color);
        let latest = self.latest_view();
        if latest.get(square) != Some((Piece::King, color)) {
            let err = match latest.find_king(color) {
                Some(_) => EngineError::KingCacheOutOfSync { color, square },
                None => EngineError::KingNotFound { color },
            };
            self.fault(err);
        }
        square
    }

    /// Reports an internal-consistency fault and stops.
    pub(crate) fn fault(&self, err: EngineError) -> ! {
        self.diagnostics.error(&err.to_string());
        panic!("internal consistency fault: {}", err);
    }

    fn take(&mut self, sq: Square) -> Option<Occupant> {
        self.squares[sq.index() as usize].take()
    }

    fn put(&mut self, sq: Square, occupant: Occupant) {
        self.squares[sq.index() as usize] = Some(occupant);
    }

    /// Moves the piece on `from` to `to` for `color`.
    ///
    /// Returns `false` and leaves the board untouched unless `to` is one of
    /// [`legal_destinations`](Board::legal_destinations)`(from, color)`.
    pub fn apply_move(&mut self, from: Square, to: Square, color: Color) -> bool {
        if !self.legal_destinations(from, color).contains(to) {
            self.diagnostics
                .warning(&format!("rejected {} move {}{}", color, from, to));
            return false;
        }
        let Some(mut mover) = self.take(from) else {
            return false;
        };

        if let Some(captured) = self.take(to) {
            self.removed.push(captured);
        }

        let mut en_passant = None;
        match mover.piece {
            Piece::King => {
                self.kings[color.index()] = to;
                if let Some((rook_from, rook_to)) = castling_rook_move(from, to, color) {
                    // The castled king keeps its "has moved" flag clear.
                    if let Some(mut rook) = self.take(rook_from) {
                        rook.moves += 1;
                        self.put(rook_to, rook);
                    }
                    if let Some(corner) = Corner::at(rook_from) {
                        self.moved.mark_rook(corner);
                    }
                } else {
                    self.moved.mark_king(color);
                }
            }
            Piece::Rook => {
                if let Some(corner) = Corner::at(from) {
                    self.moved.mark_rook(corner);
                }
            }
            Piece::Pawn => {
                if Some(to) == self.en_passant {
                    let victim = Square::new(to.file(), from.rank());
                    if self.piece_at(victim) == Some((Piece::Pawn, color.opposite())) {
                        if let Some(captured) = self.take(victim) {
                            self.removed.push(captured);
                        }
                    }
                }
                let advance = to.rank().index() as i8 - from.rank().index() as i8;
                if advance.abs() == 2 {
                    en_passant = from.offset(color.pawn_direction(), 0);
                }
            }
            _ => {}
        }

        if mover.piece == Piece::Pawn {
            self.pawnless_turns = 0;
        } else {
            self.pawnless_turns += 1;
        }
        self.en_passant = en_passant;

        mover.moves += 1;
        self.put(to, mover);
        self.history.push(self.view());
        self.diagnostics
            .info(&format!("{} {} {}{}", color, mover.piece, from, to));
        true
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("view", &self.view())
            .field("kings", &self.kings)
            .field("en_passant", &self.en_passant)
            .field("moved", &self.moved)
            .field("pawnless_turns", &self.pawnless_turns)
            .field("history_len", &self.history.len())
            .field("removed", &self.removed)
            .finish()
    }
}

#[cfg(test)]
impl Board {
    /// Builds a board holding exactly `pieces`, with no moves played.
    pub(crate) fn with_placement(
        pieces: &[(Square, Piece, Color)],
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Self {
        let mut board = Board::with_diagnostics(diagnostics);
        board.squares = [None; 64];
        for &(sq, piece, color) in pieces {
            board.put(sq, Occupant::new(piece, color));
        }
        let view = board.view();
        for color in Color::ALL {
            board.kings[color.index()] = view.find_king(color).unwrap_or(king_home(color));
        }
        board.history.clear();
        board.history.push(view);
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::testing::RecordingSink;
    use crate::diagnostics::Severity;
    use chessrules_core::Rank;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn play(board: &mut Board, moves: &[&str]) {
        let mut color = Color::White;
        for m in moves {
            let (from, to) = (sq(&m[0..2]), sq(&m[2..4]));
            assert!(board.apply_move(from, to, color), "{} {} should be legal", color, m);
            color = color.opposite();
        }
    }

    #[test]
    fn starting_layout() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::A1), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(Square::D1), Some((Piece::Queen, Color::White)));
        assert_eq!(board.piece_at(sq("e4")), None);
        for file in File::ALL {
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R2)),
                Some((Piece::Pawn, Color::White))
            );
            assert_eq!(
                board.piece_at(Square::new(file, Rank::R7)),
                Some((Piece::Pawn, Color::Black))
            );
        }
        assert_eq!(board.view().pieces().count(), 32);
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.king_square(Color::White), Square::E1);
        assert_eq!(board.king_square(Color::Black), Square::E8);
    }

    #[test]
    fn pawn_double_step_sets_en_passant() {
        let mut board = Board::new();
        play(&mut board, &["e2e4"]);
        assert_eq!(board.en_passant(), Some(sq("e3")));
        assert_eq!(board.pawnless_turns(), 0);
        play_black(&mut board, "g8f6");
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.pawnless_turns(), 1);
    }

    fn play_black(board: &mut Board, m: &str) {
        assert!(board.apply_move(sq(&m[0..2]), sq(&m[2..4]), Color::Black));
    }

    #[test]
    fn capture_moves_occupant_to_removed() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "d7d5", "e4d5"]);
        assert_eq!(board.piece_at(sq("d5")), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.removed().len(), 1);
        assert_eq!(board.removed()[0].piece, Piece::Pawn);
        assert_eq!(board.removed()[0].color, Color::Black);
        assert_eq!(board.removed()[0].moves, 1);
    }

    #[test]
    fn move_counts_accumulate() {
        let mut board = Board::new();
        play(&mut board, &["g1f3", "g8f6", "f3g1", "f6g8", "g1f3"]);
        assert_eq!(board.move_count(sq("f3")), Some(3));
        assert_eq!(board.move_count(Square::G8), Some(2));
        assert_eq!(board.move_count(sq("e4")), None);
    }

    #[test]
    fn rejected_move_is_reported_as_warning() {
        let sink = Arc::new(RecordingSink::default());
        let mut board = Board::with_diagnostics(sink.clone());
        assert!(!board.apply_move(sq("e2"), sq("e5"), Color::White));
        assert!(!board.apply_move(sq("e7"), sq("e5"), Color::White));
        assert_eq!(sink.count(Severity::Warning), 2);
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "d7d5", "e4d5", "d8d5"]);
        board.reset();
        assert_eq!(board.view(), Board::new().view());
        assert!(board.removed().is_empty());
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.en_passant(), None);
        assert_eq!(board.pawnless_turns(), 0);
        assert_eq!(board.moved_flags(), MovedFlags::NONE);
    }

    #[test]
    fn history_view_out_of_range_logs_error() {
        let sink = Arc::new(RecordingSink::default());
        let mut board = Board::with_diagnostics(sink.clone());
        play(&mut board, &["e2e4"]);
        assert!(board.history_view(HistoryIndex::At(1)).is_some());
        assert!(board.history_view(-1isize).is_some());
        assert!(board.history_view(HistoryIndex::At(2)).is_none());
        let errors: Vec<_> = sink
            .entries()
            .into_iter()
            .filter(|(s, _)| *s == Severity::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].1, "history index 2 exceeds number of records (2)");
    }

    #[test]
    fn history_matches_live_view() {
        let mut board = Board::new();
        play(&mut board, &["e2e4", "e7e5"]);
        assert_eq!(board.history_view(HistoryIndex::Latest), Some(&board.view()));
        assert_eq!(board.history().len(), 3);
    }

    #[test]
    fn corner_lookup() {
        assert_eq!(
            Corner::at(Square::H8),
            Some(Corner { color: Color::Black, queen_side: false })
        );
        assert_eq!(Corner::at(Square::E1), None);
        for corner_sq in [Square::A1, Square::H1, Square::A8, Square::H8] {
            assert_eq!(Corner::at(corner_sq).map(Corner::square), Some(corner_sq));
        }
    }

    #[test]
    fn castling_rook_squares() {
        assert_eq!(
            castling_rook_move(Square::E1, Square::G1, Color::White),
            Some((Square::H1, Square::F1))
        );
        assert_eq!(
            castling_rook_move(Square::E8, Square::C8, Color::Black),
            Some((Square::A8, Square::D8))
        );
        assert_eq!(castling_rook_move(Square::E1, Square::F1, Color::White), None);
        assert_eq!(castling_rook_move(Square::D1, Square::B1, Color::White), None);
    }

    #[test]
    fn tracked_moves_flags() {
        let mut flags = MovedFlags::NONE;
        flags.mark_king(Color::Black);
        flags.mark_rook(Corner { color: Color::White, queen_side: true });
        assert!(flags.king_moved(Color::Black));
        assert!(!flags.king_moved(Color::White));
        assert!(flags.rook_moved(Corner { color: Color::White, queen_side: true }));
        assert!(!flags.rook_moved(Corner { color: Color::White, queen_side: false }));
    }

    #[test]
    #[should_panic(expected = "cached White king square e4 does not hold the king")]
    fn corrupted_king_cache_fails_fast() {
        let mut board = Board::new();
        board.kings[Color::White.index()] = sq("e4");
        board.is_checked(Color::White);
    }

    #[test]
    #[should_panic(expected = "internal consistency fault: no White king on the board")]
    fn missing_king_fails_fast() {
        let board = Board::with_placement(
            &[(Square::E8, Piece::King, Color::Black), (sq("a2"), Piece::Pawn, Color::White)],
            Arc::new(crate::NullSink),
        );
        let _ = board.legal_destinations(sq("a2"), Color::White);
    }

    #[test]
    fn faults_are_logged_before_panicking() {
        let sink = Arc::new(RecordingSink::default());
        let board = Board::with_placement(
            &[(Square::E8, Piece::King, Color::Black)],
            sink.clone(),
        );
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            board.is_checked(Color::White)
        }));
        assert!(result.is_err());
        assert_eq!(sink.count(Severity::Error), 1);
        let entries = sink.entries();
        assert!(entries[entries.len() - 1].1.contains("no White king on the board"));
        // The other side is unaffected.
        assert!(!board.is_checked(Color::Black));
    }
}
