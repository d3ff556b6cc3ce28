//! Kifu-View: replay and visualize recorded Go games.
//!
//! This crate replays tree-structured game records move by move, keeping a
//! board grid in sync with a record cursor through single-cell diffs, and
//! alternatively visualizes per-move probability heatmaps dumped by an
//! external analysis tool. Frames are composed as backend-agnostic draw
//! commands; the windowing shell and raster backend stay outside.
//!
//! ## Modules
//!
//! - [`sgf`] - parser for the record format, yielding an arena node tree
//! - [`record`] - move record model: root properties, cursor, move decoding
//! - [`board`] - incrementally-maintained board grid and last-move marker
//! - [`weights`] - weight snapshot parsing and per-snapshot normalization
//! - [`geometry`] - isometric diamond-tiling projection of the board
//! - [`render`] - draw-command composition for both modes
//! - [`session`] - the control surface the owning shell drives
//! - [`constants`] - geometry and composition constants
//!
//! ## Example
//!
//! ```
//! use kifu_view::session::{Session, StepOutcome};
//!
//! let mut session = Session::new();
//! session
//!     .load_move_record("(;SZ[9]PB[Kuro]PW[Shiro];B[cc];W[gg])")
//!     .unwrap();
//!
//! assert_eq!(session.step_forward(), StepOutcome::Advanced);
//! let commands = session.draw_commands((400.0, 400.0));
//! assert!(commands.len() > 1);
//! ```

pub mod board;
pub mod constants;
pub mod geometry;
pub mod record;
pub mod render;
pub mod session;
pub mod sgf;
pub mod weights;
