//! Backend-agnostic frame composition.
//!
//! Turns the current board state (or a normalized weight snapshot) plus a
//! viewport size into an ordered list of [`DrawCommand`]s. The raster
//! backend that executes them - lines, filled polygons, circles, text -
//! belongs to the owning shell and never appears here.
//!
//! Composition is a pure function of its inputs: no state is retained
//! between calls, and identical inputs produce an identical command list.

use crate::board::Board;
use crate::constants::{
    BANNER_LINE_HEIGHT, BANNER_X, MARKER_RADIUS, RAIL_WIDTH, STONE_RADIUS_FRAC,
};
use crate::geometry::{BoardLayout, Vec2};
use crate::record::Color;
use crate::weights::WeightCell;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Neutral background and cell fill.
pub const BACKGROUND: Rgb = Rgb(200, 200, 200);
/// Outline, marker, and label ink.
pub const INK: Rgb = Rgb(0, 0, 0);
/// Black's stones render red.
pub const BLACK_STONE: Rgb = Rgb(255, 0, 0);
/// White's stones render blue.
pub const WHITE_STONE: Rgb = Rgb(67, 83, 255);

pub fn stone_color(color: Color) -> Rgb {
    match color {
        Color::Black => BLACK_STONE,
        Color::White => WHITE_STONE,
    }
}

/// Placement of label text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Text sits above the anchor, left-aligned to it.
    Above,
    /// Text ends at the anchor, vertically centered on it.
    Left,
    /// Text hangs below-right of the anchor.
    TopLeft,
}

/// One backend-agnostic drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole viewport.
    Clear { color: Rgb },
    /// Open polyline with the given stroke width.
    Polyline {
        points: Vec<Vec2>,
        color: Rgb,
        width: f32,
    },
    /// Filled polygon with a contrasting outline.
    Polygon {
        points: Vec<Vec2>,
        fill: Rgb,
        outline: Rgb,
    },
    /// Filled circle.
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    /// Text label; exact metrics are the backend's concern.
    Label {
        text: String,
        at: Vec2,
        anchor: Anchor,
        color: Rgb,
    },
}

/// Linear blend from `from` to `to`; `t` is clamped to `[0, 1]`.
fn blend(from: Rgb, to: Rgb, t: f32) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// Rails and coordinate labels shared by both modes.
fn push_board_frame(out: &mut Vec<DrawCommand>, layout: &BoardLayout) {
    let rails = layout.rails();
    out.push(DrawCommand::Polyline {
        points: rails.top,
        color: BLACK_STONE,
        width: RAIL_WIDTH,
    });
    out.push(DrawCommand::Polyline {
        points: rails.bottom,
        color: BLACK_STONE,
        width: RAIL_WIDTH,
    });
    out.push(DrawCommand::Polyline {
        points: rails.left,
        color: WHITE_STONE,
        width: RAIL_WIDTH,
    });
    out.push(DrawCommand::Polyline {
        points: rails.right,
        color: WHITE_STONE,
        width: RAIL_WIDTH,
    });
    for i in 0..layout.size {
        out.push(DrawCommand::Label {
            text: BoardLayout::column_label(i).to_string(),
            at: layout.column_label_anchor(i),
            anchor: Anchor::Above,
            color: INK,
        });
        out.push(DrawCommand::Label {
            text: (i + 1).to_string(),
            at: layout.row_label_anchor(i),
            anchor: Anchor::Left,
            color: INK,
        });
    }
}

fn push_cell(out: &mut Vec<DrawCommand>, layout: &BoardLayout, col: usize, row: usize) {
    out.push(DrawCommand::Polygon {
        points: layout.cell_polygon(col, row).to_vec(),
        fill: BACKGROUND,
        outline: INK,
    });
}

fn push_stone(
    out: &mut Vec<DrawCommand>,
    layout: &BoardLayout,
    col: usize,
    row: usize,
    color: Rgb,
) {
    out.push(DrawCommand::Circle {
        center: layout.cell_center(col, row),
        radius: layout.metrics.edge * STONE_RADIUS_FRAC,
        color,
    });
}

/// Compose a full frame for a replayed record position.
pub fn compose_record(
    board: &Board,
    black_name: &str,
    white_name: &str,
    viewport: Vec2,
) -> Vec<DrawCommand> {
    let layout = BoardLayout::new(board.size(), viewport);
    let mut out = vec![DrawCommand::Clear { color: BACKGROUND }];
    push_board_frame(&mut out, &layout);

    for col in 0..board.size() {
        for row in 0..board.size() {
            push_cell(&mut out, &layout, col, row);
            if let Some(color) = board.get(col, row) {
                push_stone(&mut out, &layout, col, row, stone_color(color));
            }
            if board.last_move() == Some((col, row)) {
                out.push(DrawCommand::Circle {
                    center: layout.cell_center(col, row),
                    radius: MARKER_RADIUS,
                    color: INK,
                });
            }
        }
    }

    out.push(DrawCommand::Label {
        text: format!("Red: {black_name}"),
        at: (BANNER_X, 0.0),
        anchor: Anchor::TopLeft,
        color: BLACK_STONE,
    });
    out.push(DrawCommand::Label {
        text: format!("Blue: {white_name}"),
        at: (BANNER_X, BANNER_LINE_HEIGHT),
        anchor: Anchor::TopLeft,
        color: WHITE_STONE,
    });
    out
}

/// Compose a heatmap frame from a normalized snapshot.
///
/// Occupied cells get a full-color stone; empty cells with a positive
/// normalized probability get a circle blended from the neutral fill toward
/// the dominant color, with the probability as the blend factor.
pub fn compose_snapshot(cells: &[WeightCell], size: usize, viewport: Vec2) -> Vec<DrawCommand> {
    let layout = BoardLayout::new(size, viewport);
    let mut out = vec![DrawCommand::Clear { color: BACKGROUND }];
    push_board_frame(&mut out, &layout);

    for col in 0..size {
        for row in 0..size {
            push_cell(&mut out, &layout, col, row);
            let cell = &cells[row * size + col];
            match cell.occupant {
                Some(color) => push_stone(&mut out, &layout, col, row, stone_color(color)),
                None => {
                    let (prob, full) = if cell.black >= cell.white {
                        (cell.black, BLACK_STONE)
                    } else {
                        (cell.white, WHITE_STONE)
                    };
                    if prob > 0.0 {
                        push_stone(
                            &mut out,
                            &layout,
                            col,
                            row,
                            blend(BACKGROUND, full, prob as f32),
                        );
                    }
                }
            }
        }
    }
    out
}
