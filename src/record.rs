//! Move record model and cursor.
//!
//! This module wraps a parsed [`GameTree`] and exposes the navigation
//! surface the rest of the crate works against:
//! - [`GameRecord`] reads the interpreted root properties (board size and
//!   player names) and hands out cursors
//! - [`Cursor`] is a movable position on the main line with single-step
//!   forward/back and boundary detection
//! - [`MoveEvent`] is the decoded content of one node
//!
//! The cursor holds only the current node id; relative lookups
//! ([`Cursor::peek_next`], [`Cursor::current_event`]) are read-only, so
//! computing "the move below the one being undone" never requires the
//! move-and-rewind dance.
//!
//! Coordinate decoding: each axis character `c` maps to `c - 'a'`. The
//! column axis is used as-is; the row axis is flipped (`size - 1 - row`)
//! so the game's bottom-left origin lands on the renderer's top-left one.
//! Decoded coordinates are deliberately not validated here - malformed
//! records can produce out-of-range values, and the board tracker
//! bounds-guards every write.

use thiserror::Error;

use crate::sgf::{self, GameTree, Node, NodeId};

/// A board coordinate as `(col, row)`, each in `[0, size)` when valid.
pub type Coord = (usize, usize);

/// Stone color. `Black` is the record's `B` player, `White` its `W` player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

/// Decoded content of one main-line node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveEvent {
    /// A stone placement. `at` may be out of range for malformed input.
    Play { color: Color, at: Coord },
    /// An empty move value: the player passed. Advances the cursor but
    /// never mutates the board.
    Pass { color: Color },
    /// The node carries neither a `B` nor a `W` property. Non-fatal:
    /// navigation proceeds and the last-move marker is cleared.
    Malformed,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    Syntax(#[from] sgf::ParseError),
    #[error("record root has no SZ (board size) property")]
    MissingSize,
    #[error("unusable board size {0:?}")]
    InvalidSize(String),
}

/// Signaled on any attempt to navigate past either end of the main line.
/// Expected and non-fatal; callers use it to toggle control availability.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("cursor is at the edge of the recorded main line")]
pub struct TreeBoundary;

/// A loaded move record: the node tree plus its interpreted root properties.
#[derive(Debug, Clone)]
pub struct GameRecord {
    tree: GameTree,
    size: usize,
    black_name: String,
    white_name: String,
}

impl GameRecord {
    /// Parse record text and interpret the root properties.
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        Self::from_tree(sgf::parse(text)?)
    }

    /// Wrap an already-parsed tree. The root must carry a usable `SZ`;
    /// player names default to empty strings when absent.
    pub fn from_tree(tree: GameTree) -> Result<Self, RecordError> {
        let root = tree.node(tree.root());
        let sz = root.first("SZ").ok_or(RecordError::MissingSize)?;
        let size: usize = sz
            .trim()
            .parse()
            .map_err(|_| RecordError::InvalidSize(sz.to_string()))?;
        if size == 0 {
            return Err(RecordError::InvalidSize(sz.to_string()));
        }
        let black_name = root.first("PB").unwrap_or_default().to_string();
        let white_name = root.first("PW").unwrap_or_default().to_string();
        Ok(Self {
            tree,
            size,
            black_name,
            white_name,
        })
    }

    /// Board size, fixed at load time.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn black_name(&self) -> &str {
        &self.black_name
    }

    pub fn white_name(&self) -> &str {
        &self.white_name
    }

    /// Number of nodes on the main line below the root.
    pub fn main_line_len(&self) -> usize {
        self.tree.main_line_len()
    }

    /// A cursor positioned at the synthetic root, before the first move.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            current: self.tree.root(),
        }
    }

    /// Decoded events of the whole main line, in order. Reference data for
    /// the reset-and-replay equivalence checks.
    pub fn main_line_events(&self) -> Vec<MoveEvent> {
        let mut events = Vec::new();
        let mut cursor = self.cursor();
        while let Ok(event) = cursor.advance(self) {
            events.push(event);
        }
        events
    }
}

/// A movable position within the record tree.
///
/// The cursor never touches node data; it only changes its own position,
/// and all lookups borrow the record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    current: NodeId,
}

impl Cursor {
    pub fn at_root(&self, record: &GameRecord) -> bool {
        self.current == record.tree.root()
    }

    /// Main-line successor of the current position, if any.
    pub fn peek_next(&self, record: &GameRecord) -> Option<NodeId> {
        record.tree.first_child(self.current)
    }

    /// Decoded event of the node under the cursor; `None` at the root.
    pub fn current_event(&self, record: &GameRecord) -> Option<MoveEvent> {
        if self.at_root(record) {
            None
        } else {
            Some(decode_node(record.tree.node(self.current), record.size))
        }
    }

    /// Step to the next main-line node and decode it.
    pub fn advance(&mut self, record: &GameRecord) -> Result<MoveEvent, TreeBoundary> {
        let next = self.peek_next(record).ok_or(TreeBoundary)?;
        self.current = next;
        Ok(decode_node(record.tree.node(next), record.size))
    }

    /// Step back to the predecessor, returning the event being undone.
    pub fn retreat(&mut self, record: &GameRecord) -> Result<MoveEvent, TreeBoundary> {
        if self.at_root(record) {
            return Err(TreeBoundary);
        }
        let removed = decode_node(record.tree.node(self.current), record.size);
        // A non-root node always has a parent.
        if let Some(parent) = record.tree.parent(self.current) {
            self.current = parent;
        }
        Ok(removed)
    }
}

/// Decode one node into a [`MoveEvent`]. The `B` key wins over `W` when a
/// node carries both.
fn decode_node(node: &Node, size: usize) -> MoveEvent {
    let (color, value) = if let Some(v) = node.first("B") {
        (Color::Black, v)
    } else if let Some(v) = node.first("W") {
        (Color::White, v)
    } else {
        return MoveEvent::Malformed;
    };
    if value.is_empty() {
        return MoveEvent::Pass { color };
    }
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return MoveEvent::Malformed;
    }
    let col = (bytes[0] as usize).wrapping_sub(b'a' as usize);
    let raw_row = (bytes[1] as usize).wrapping_sub(b'a' as usize);
    // Flip the row axis; wrapping keeps out-of-range input representable
    // (and rejectable by the board's bounds guard).
    let row = (size - 1).wrapping_sub(raw_row);
    MoveEvent::Play {
        color,
        at: (col, row),
    }
}
