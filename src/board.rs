//! Board state tracker.
//!
//! Maintains the size×size grid of cell states and the last-move marker as
//! a cached projection of the cursor's path through the record: every
//! navigation step applies a single-cell diff instead of replaying from the
//! root. The defining invariant is that after any sequence of forward/back
//! steps ending at tree position P, the grid is bit-for-bit identical to
//! [`Board::replay`] of the root-to-P events.
//!
//! Out-of-range coordinates can arrive from malformed records; writes are
//! bounds-guarded and silently ignored rather than reported.

use std::fmt;

use crate::record::{Color, Coord, MoveEvent};

/// Incrementally-maintained board grid plus the last-move marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
    last: Option<Coord>,
}

impl Board {
    /// An all-empty grid with the marker cleared.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            last: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.size + col
    }

    fn contains(&self, (col, row): Coord) -> bool {
        col < self.size && row < self.size
    }

    /// Cell state, `None` for empty or out-of-range coordinates.
    pub fn get(&self, col: usize, row: usize) -> Option<Color> {
        if !self.contains((col, row)) {
            return None;
        }
        self.cells[self.idx(col, row)]
    }

    /// Coordinate of the most recent placement, if the current event left one.
    pub fn last_move(&self) -> Option<Coord> {
        self.last
    }

    /// Marker contributed by one event: the target of an in-range placement,
    /// nothing for passes, malformed nodes, or out-of-range coordinates.
    fn marker_of(&self, event: &MoveEvent) -> Option<Coord> {
        match *event {
            MoveEvent::Play { at, .. } if self.contains(at) => Some(at),
            _ => None,
        }
    }

    /// Apply the event just stepped onto.
    pub fn apply_forward(&mut self, event: &MoveEvent) {
        if let MoveEvent::Play { color, at } = *event {
            if self.contains(at) {
                let i = self.idx(at.0, at.1);
                self.cells[i] = Some(color);
            }
        }
        self.last = self.marker_of(event);
    }

    /// Undo `removed` (the event just stepped off of) and recompute the
    /// marker from whatever event is now current - `None` once back at the
    /// root.
    pub fn apply_back(&mut self, removed: &MoveEvent, now_current: Option<&MoveEvent>) {
        if let MoveEvent::Play { at, .. } = *removed {
            if self.contains(at) {
                let i = self.idx(at.0, at.1);
                self.cells[i] = None;
            }
        }
        self.last = now_current.and_then(|event| self.marker_of(event));
    }

    /// Reset-and-replay reference: the grid produced by applying `events`
    /// in order onto a fresh board.
    pub fn replay<'a, I>(size: usize, events: I) -> Self
    where
        I: IntoIterator<Item = &'a MoveEvent>,
    {
        let mut board = Self::new(size);
        for event in events {
            board.apply_forward(event);
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get(col, row) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
