//! Scoped what-if edits on a snapshot.
//!
//! A [`Simulation`] overwrites a handful of squares of a [`BoardView`] and
//! puts the original contents back when it is dropped, so a hypothetical move
//! can be checked against the attack detector without leaking.

use crate::view::{BoardView, Occupancy};
use chessrules_core::Square;
use std::ops::Deref;

/// A move plus an optional en-passant victim touches at most three squares.
const MAX_EDITS: usize = 3;

pub(crate) struct Simulation<'a> {
    view: &'a mut BoardView,
    saved: [(Square, Occupancy); MAX_EDITS],
    len: usize,
}

impl<'a> Simulation<'a> {
    /// Moves the occupant of `from` to `to`, also clearing `also_clear`
    /// (the pawn taken en passant) when given.
    pub(crate) fn relocate(
        view: &'a mut BoardView,
        from: Square,
        to: Square,
        also_clear: Option<Square>,
    ) -> Self {
        let mut sim = Simulation {
            view,
            saved: [(Square::A1, None); MAX_EDITS],
            len: 0,
        };
        let mover = sim.view.get(from);
        sim.write(from, None);
        sim.write(to, mover);
        if let Some(victim) = also_clear {
            sim.write(victim, None);
        }
        sim
    }

    fn write(&mut self, sq: Square, occupancy: Occupancy) {
        debug_assert!(self.len < MAX_EDITS);
        self.saved[self.len] = (sq, self.view.get(sq));
        self.len += 1;
        self.view.set(sq, occupancy);
    }
}

impl Deref for Simulation<'_> {
    type Target = BoardView;

    fn deref(&self) -> &BoardView {
        self.view
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        // Reverse order so a square written twice ends at its first saved value.
        for &(sq, occupancy) in self.saved[..self.len].iter().rev() {
            self.view.set(sq, occupancy);
        }
    }
}
