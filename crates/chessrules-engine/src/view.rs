//! Point-in-time board snapshots and the append-only history of them.

use chessrules_core::{Color, Piece, Square};
use std::fmt;

/// What a snapshot records for one square.
pub type Occupancy = Option<(Piece, Color)>;

/// An immutable copy of the board's occupancy at one instant.
///
/// Two views are equal when all 64 squares hold the same piece kind and color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardView {
    squares: [Occupancy; 64],
}

impl BoardView {
    /// A view with no pieces.
    pub const EMPTY: BoardView = BoardView {
        squares: [None; 64],
    };

    /// Returns the occupant of a square.
    #[inline]
    pub fn get(&self, sq: Square) -> Occupancy {
        self.squares[sq.index() as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, sq: Square, occupancy: Occupancy) {
        self.squares[sq.index() as usize] = occupancy;
    }

    /// Scans for the king of the given color.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.get(sq) == Some((Piece::King, color)))
    }

    /// Iterates over the occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|(piece, color)| (sq, piece, color)))
    }
}

impl Default for BoardView {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Renders the view with rank 8 on top: uppercase for White, lowercase for
/// Black, `.` for empty squares.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let c = Square::from_coords(rank, file)
                    .and_then(|sq| self.get(sq))
                    .map_or('.', |(piece, color)| piece.to_char(color));
                write!(f, "{} ", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl fmt::Debug for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BoardView")?;
        fmt::Display::fmt(self, f)
    }
}

/// Selects an entry of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryIndex {
    /// The most recent snapshot.
    Latest,
    /// The snapshot at a zero-based position; 0 is the starting position.
    At(usize),
}

impl From<isize> for HistoryIndex {
    /// Negative values select the most recent snapshot.
    fn from(value: isize) -> Self {
        if value < 0 {
            HistoryIndex::Latest
        } else {
            HistoryIndex::At(value as usize)
        }
    }
}

/// Append-only record of snapshots, one per applied move plus the start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    views: Vec<BoardView>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, view: BoardView) {
        self.views.push(view);
    }

    pub(crate) fn clear(&mut self) {
        self.views.clear();
    }

    /// Number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&BoardView> {
        self.views.last()
    }

    /// Resolves an index to a snapshot.
    pub fn get(&self, index: HistoryIndex) -> Option<&BoardView> {
        match index {
            HistoryIndex::Latest => self.views.last(),
            HistoryIndex::At(i) => self.views.get(i),
        }
    }

    /// Counts snapshots equal to the latest one among the latest snapshot
    /// and the `depth` snapshots before it.
    pub fn occurrences_of_latest(&self, depth: usize) -> usize {
        let Some((latest, earlier)) = self.views.split_last() else {
            return 0;
        };
        1 + earlier
            .iter()
            .rev()
            .take(depth)
            .filter(|view| *view == latest)
            .count()
    }
}
