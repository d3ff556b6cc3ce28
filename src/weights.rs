//! Weight snapshot mode.
//!
//! The alternative to replaying a move record: an analysis tool dumps, one
//! JSON-shaped line per position, a full-board map from coordinate label to
//! occupant and per-color raw magnitudes. This module parses that stream
//! into an immutable [`SnapshotSequence`] and normalizes each snapshot's
//! magnitudes into `[0, 1]` probabilities on demand.
//!
//! Only lines beginning with `{` are records; everything else in the stream
//! (engine chatter, blank lines) is discarded without error. Magnitudes may
//! carry the bare `+Inf` token, which is rewritten to a very large finite
//! value before JSON parsing rather than rejected.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{INF_SENTINEL, INF_SUBSTITUTE};
use crate::record::{Color, Coord};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot line {line}: {source}")]
    Syntax {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot line {line}: {count} entries does not fill a square board")]
    NotSquare { line: usize, count: usize },
    #[error("snapshot line {line}: expected {expected} entries, found {found}")]
    EntryCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("snapshot line {line}: unusable board label {label:?}")]
    BadLabel { line: usize, label: String },
    #[error("stream contains no snapshot records")]
    Empty,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawOccupant {
    Black,
    White,
    Empty,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct RawEntry {
    occupant: RawOccupant,
    black: f64,
    white: f64,
}

/// One cell of a normalized snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCell {
    pub occupant: Option<Color>,
    /// Normalized magnitude for Black, in `[0, 1]`.
    pub black: f64,
    /// Normalized magnitude for White, in `[0, 1]`.
    pub white: f64,
}

/// One complete board observation, stored with its raw magnitudes.
#[derive(Debug, Clone)]
pub struct Snapshot {
    size: usize,
    occupants: Vec<Option<Color>>,
    black_raw: Vec<f64>,
    white_raw: Vec<f64>,
}

impl Snapshot {
    fn empty(size: usize) -> Self {
        let cells = size * size;
        Self {
            size,
            occupants: vec![None; cells],
            black_raw: vec![0.0; cells],
            white_raw: vec![0.0; cells],
        }
    }

    pub fn occupant(&self, col: usize, row: usize) -> Option<Color> {
        self.occupants[row * self.size + col]
    }

    pub fn raw_magnitudes(&self, col: usize, row: usize) -> (f64, f64) {
        let i = row * self.size + col;
        (self.black_raw[i], self.white_raw[i])
    }

    /// Run the per-snapshot normalization: find each color's maximum raw
    /// magnitude, then divide every cell by it. A color whose maximum is
    /// not positive keeps all probabilities at zero instead of dividing by
    /// zero.
    pub fn normalized(&self) -> Vec<WeightCell> {
        let mut max_black = f64::NEG_INFINITY;
        let mut max_white = f64::NEG_INFINITY;
        for i in 0..self.occupants.len() {
            max_black = max_black.max(self.black_raw[i]);
            max_white = max_white.max(self.white_raw[i]);
        }
        let scale = |raw: f64, max: f64| if max > 0.0 { raw / max } else { 0.0 };
        (0..self.occupants.len())
            .map(|i| WeightCell {
                occupant: self.occupants[i],
                black: scale(self.black_raw[i], max_black),
                white: scale(self.white_raw[i], max_white),
            })
            .collect()
    }
}

/// An ordered, index-addressable sequence of snapshots. Immutable after
/// load; navigation is a flat integer index owned by the session.
#[derive(Debug, Clone)]
pub struct SnapshotSequence {
    size: usize,
    snapshots: Vec<Snapshot>,
}

impl SnapshotSequence {
    /// Parse a snapshot stream. Board size is inferred as the integer
    /// square root of the first record's entry count; every later record
    /// must match it.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let mut size = 0usize;
        let mut snapshots: Vec<Snapshot> = Vec::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim();
            if !trimmed.starts_with('{') {
                continue;
            }
            let sanitized = trimmed.replace(INF_SENTINEL, INF_SUBSTITUTE);
            let entries: HashMap<String, RawEntry> = serde_json::from_str(&sanitized)
                .map_err(|source| SnapshotError::Syntax { line, source })?;

            if snapshots.is_empty() {
                let count = entries.len();
                let side = integer_sqrt(count);
                if side == 0 || side * side != count {
                    return Err(SnapshotError::NotSquare { line, count });
                }
                size = side;
            } else if entries.len() != size * size {
                return Err(SnapshotError::EntryCountMismatch {
                    line,
                    expected: size * size,
                    found: entries.len(),
                });
            }

            let mut snapshot = Snapshot::empty(size);
            for (label, entry) in &entries {
                let (col, row) =
                    parse_label(label, size).ok_or_else(|| SnapshotError::BadLabel {
                        line,
                        label: label.clone(),
                    })?;
                let i = row * size + col;
                snapshot.occupants[i] = match entry.occupant {
                    RawOccupant::Black => Some(Color::Black),
                    RawOccupant::White => Some(Color::White),
                    RawOccupant::Empty => None,
                };
                snapshot.black_raw[i] = entry.black;
                snapshot.white_raw[i] = entry.white;
            }
            snapshots.push(snapshot);
        }
        if snapshots.is_empty() {
            return Err(SnapshotError::Empty);
        }
        Ok(Self { size, snapshots })
    }

    /// Inferred board size.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Normalized view of snapshot `index`; re-runs the normalization so
    /// the stored raw magnitudes stay untouched.
    pub fn normalized(&self, index: usize) -> Option<Vec<WeightCell>> {
        self.snapshots.get(index).map(Snapshot::normalized)
    }
}

/// Decode a conventional board label: a column letter (skipping `I`) and a
/// 1-based row number, e.g. `"A1"`, `"j9"`. Returns `None` for anything
/// that does not name a cell on a `size`×`size` board.
pub fn parse_label(label: &str, size: usize) -> Option<Coord> {
    if !label.is_ascii() || label.len() < 2 {
        return None;
    }
    let bytes = label.as_bytes();
    let letter = bytes[0].to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == b'I' {
        return None;
    }
    let mut col = (letter - b'A') as usize;
    if letter > b'I' {
        col -= 1;
    }
    let number: usize = label[1..].parse().ok()?;
    if number == 0 {
        return None;
    }
    let row = number - 1;
    if col >= size || row >= size {
        return None;
    }
    Some((col, row))
}

/// Column label for `col` in the same convention, uppercase.
pub fn column_name(col: usize) -> char {
    let mut letter = b'A' + col as u8;
    if letter >= b'I' {
        letter += 1;
    }
    letter as char
}

fn integer_sqrt(n: usize) -> usize {
    let mut s = (n as f64).sqrt() as usize;
    while s * s > n {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= n {
        s += 1;
    }
    s
}
