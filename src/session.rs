//! Session control surface.
//!
//! One [`Session`] owns the single board/cursor/snapshot state; the owning
//! shell forwards its three events (navigate back, navigate forward, file
//! selected) here and calls [`Session::draw_commands`] from its redraw
//! tick. Everything runs on the shell's one logical thread - nothing in
//! the session blocks or performs I/O outside the explicit file loads.
//!
//! ## Operations
//!
//! - `load_move_record` / `load_move_record_file` - enter replay mode
//! - `load_weight_snapshots` / `load_weight_snapshots_file` - enter
//!   heatmap mode
//! - `step_forward` / `step_back` - navigate; the returned [`StepOutcome`]
//!   is what the shell uses to enable or disable its controls
//! - `draw_commands` - compose the current frame for a viewport
//!
//! A load parses into a complete new mode value before swapping it in, so
//! a failed load reports its error and leaves the previous session state
//! fully active.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::board::Board;
use crate::record::{Cursor, GameRecord, RecordError};
use crate::render::{self, DrawCommand};
use crate::weights::{SnapshotError, SnapshotSequence};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Snapshots(#[from] SnapshotError),
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced,
    /// The cursor was already at the end being stepped past; nothing moved.
    Boundary,
}

/// The two navigation shapes a session can be in: a tree cursor with an
/// incrementally-diffed board, or a flat index into complete snapshots.
enum Mode {
    TreeCursor {
        record: GameRecord,
        cursor: Cursor,
        board: Board,
    },
    SnapshotIndex {
        sequence: SnapshotSequence,
        index: usize,
    },
}

/// The single state object threaded through every entry point.
#[derive(Default)]
pub struct Session {
    mode: Option<Mode>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` as a move record and swap it in, positioned at the
    /// root with an empty board.
    pub fn load_move_record(&mut self, text: &str) -> Result<(), LoadError> {
        let record = GameRecord::parse(text)?;
        let cursor = record.cursor();
        let board = Board::new(record.size());
        info!(
            size = record.size(),
            moves = record.main_line_len(),
            "loaded move record"
        );
        self.mode = Some(Mode::TreeCursor {
            record,
            cursor,
            board,
        });
        Ok(())
    }

    pub fn load_move_record_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_move_record(&text)
    }

    /// Parse `text` as a weight snapshot stream and swap it in at index 0.
    pub fn load_weight_snapshots(&mut self, text: &str) -> Result<(), LoadError> {
        let sequence = SnapshotSequence::parse(text)?;
        info!(
            size = sequence.size(),
            snapshots = sequence.len(),
            "loaded weight snapshots"
        );
        self.mode = Some(Mode::SnapshotIndex { sequence, index: 0 });
        Ok(())
    }

    pub fn load_weight_snapshots_file(&mut self, path: &Path) -> Result<(), LoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_weight_snapshots(&text)
    }

    pub fn step_forward(&mut self) -> StepOutcome {
        match &mut self.mode {
            None => StepOutcome::Boundary,
            Some(Mode::TreeCursor {
                record,
                cursor,
                board,
            }) => match cursor.advance(record) {
                Ok(event) => {
                    board.apply_forward(&event);
                    StepOutcome::Advanced
                }
                Err(_) => StepOutcome::Boundary,
            },
            Some(Mode::SnapshotIndex { sequence, index }) => {
                if *index + 1 < sequence.len() {
                    *index += 1;
                    StepOutcome::Advanced
                } else {
                    StepOutcome::Boundary
                }
            }
        }
    }

    pub fn step_back(&mut self) -> StepOutcome {
        match &mut self.mode {
            None => StepOutcome::Boundary,
            Some(Mode::TreeCursor {
                record,
                cursor,
                board,
            }) => match cursor.retreat(record) {
                Ok(removed) => {
                    let now_current = cursor.current_event(record);
                    board.apply_back(&removed, now_current.as_ref());
                    StepOutcome::Advanced
                }
                Err(_) => StepOutcome::Boundary,
            },
            Some(Mode::SnapshotIndex { index, .. }) => {
                if *index > 0 {
                    *index -= 1;
                    StepOutcome::Advanced
                } else {
                    StepOutcome::Boundary
                }
            }
        }
    }

    /// Compose the current frame. With nothing loaded yet, only the
    /// background clear is emitted.
    pub fn draw_commands(&self, viewport: (f32, f32)) -> Vec<DrawCommand> {
        match &self.mode {
            None => vec![DrawCommand::Clear {
                color: render::BACKGROUND,
            }],
            Some(Mode::TreeCursor { record, board, .. }) => render::compose_record(
                board,
                record.black_name(),
                record.white_name(),
                viewport,
            ),
            Some(Mode::SnapshotIndex { sequence, index }) => {
                match sequence.normalized(*index) {
                    Some(cells) => render::compose_snapshot(&cells, sequence.size(), viewport),
                    None => vec![DrawCommand::Clear {
                        color: render::BACKGROUND,
                    }],
                }
            }
        }
    }

    /// Replay-mode board, if a record is loaded.
    pub fn board(&self) -> Option<&Board> {
        match &self.mode {
            Some(Mode::TreeCursor { board, .. }) => Some(board),
            _ => None,
        }
    }

    /// Replay-mode record, if one is loaded.
    pub fn record(&self) -> Option<&GameRecord> {
        match &self.mode {
            Some(Mode::TreeCursor { record, .. }) => Some(record),
            _ => None,
        }
    }

    /// Heatmap-mode sequence, if one is loaded.
    pub fn snapshots(&self) -> Option<&SnapshotSequence> {
        match &self.mode {
            Some(Mode::SnapshotIndex { sequence, .. }) => Some(sequence),
            _ => None,
        }
    }

    /// Current snapshot index in heatmap mode.
    pub fn snapshot_index(&self) -> Option<usize> {
        match &self.mode {
            Some(Mode::SnapshotIndex { index, .. }) => Some(*index),
            _ => None,
        }
    }
}
