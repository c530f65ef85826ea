//! A set of board squares backed by a 64-bit mask.
//!
//! Legal destinations are returned as a `SquareSet`. Bit 0 = a1, bit 1 = b1,
//! ..., bit 63 = h8, matching [`Square::index`].

use chessrules_core::Square;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of squares.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: SquareSet = SquareSet(0);

    /// Creates a set holding a single square.
    #[inline]
    pub const fn from_square(sq: Square) -> Self {
        SquareSet(1u64 << sq.index())
    }

    /// Returns the raw mask.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true if no square is in the set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the square is in the set.
    #[inline]
    pub const fn contains(self, sq: Square) -> bool {
        (self.0 & (1u64 << sq.index())) != 0
    }

    /// Adds a square.
    #[inline]
    pub fn insert(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    /// Removes a square.
    #[inline]
    pub fn remove(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    /// Iterates over the squares in ascending index order.
    #[inline]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let marked = (self.0 >> (rank * 8 + file)) & 1 == 1;
                write!(f, "{} ", if marked { 'X' } else { '.' })?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

impl BitOr for SquareSet {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SquareSet {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        SquareSet(self.0 & rhs.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SquareSet({:#018x})", self.0)?;
        self.write_grid(f)
    }
}

/// Renders the set as an 8x8 grid with `X` on member squares, rank 8 on top.
impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_grid(f)
    }
}

/// Iterator over the squares of a [`SquareSet`].
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as u8;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessrules_core::{File, Rank};

    #[test]
    fn insert_contains_remove() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square::A1);
        set.insert(Square::H8);
        assert!(set.contains(Square::A1));
        assert!(set.contains(Square::H8));
        assert!(!set.contains(Square::B1));
        assert_eq!(set.len(), 2);
        set.remove(Square::A1);
        assert!(!set.contains(Square::A1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn iterates_in_index_order() {
        let set: SquareSet = [Square::H8, Square::E1, Square::A1].into_iter().collect();
        let squares: Vec<Square> = set.into_iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E1, Square::H8]);
    }

    #[test]
    fn union() {
        let a = SquareSet::from_square(Square::A1);
        let b = SquareSet::from_square(Square::B1);
        assert_eq!((a | b).len(), 2);
        assert!((a & b).is_empty());
    }

    #[test]
    fn display_grid() {
        let set = SquareSet::from_square(Square::new(File::E, Rank::R4));
        let text = set.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[4], "4 . . . . X . . . ");
        assert_eq!(lines[8], "  a b c d e f g h");
    }
}
