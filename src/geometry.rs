//! Diamond-tiling geometry.
//!
//! Projects an N×N board onto an isometric "diamond" tiling: each cell is a
//! regular-hexagon footprint, columns run along the horizontal axis, and
//! every successive row is shifted down-right by half a cell width. All of
//! it is pure arithmetic over the board size and viewport - nothing here
//! retains state, so the layout is recomputed on every redraw and resizing
//! the viewport simply re-centers the board.
//!
//! Cell metrics from the edge length `C`: short radius `A = C/2`, half
//! width `B = C·sin 60°`, cell width `2B`, cell height `2C`. The occupied
//! area is `size·2B + size·B` wide (the half-width stagger accumulated over
//! all rows) and `size·(A + C)` tall.

use crate::constants::{CELL_EDGE, LABEL_PAD, RAIL_WIDTH};

/// A point or extent in screen space.
pub type Vec2 = (f32, f32);

/// Regular-hexagon cell footprint derived from the edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    /// Edge length (`C`).
    pub edge: f32,
    /// Short radius (`A`), the vertical inset of the upper vertices.
    pub short_radius: f32,
    /// Half width (`B`).
    pub half_width: f32,
    /// Full cell width (`2B`).
    pub width: f32,
    /// Full cell height (`2C`).
    pub height: f32,
}

impl CellMetrics {
    pub fn from_edge(edge: f32) -> Self {
        let short_radius = 0.5 * edge;
        let half_width = edge * 60f32.to_radians().sin();
        Self {
            edge,
            short_radius,
            half_width,
            width: 2.0 * half_width,
            height: 2.0 * edge,
        }
    }
}

/// Border polylines framing the tiled board.
#[derive(Debug, Clone, PartialEq)]
pub struct Rails {
    pub top: Vec<Vec2>,
    pub bottom: Vec<Vec2>,
    pub left: Vec<Vec2>,
    pub right: Vec<Vec2>,
}

/// Screen placement of an N×N board within a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub size: usize,
    pub metrics: CellMetrics,
    pub total_width: f32,
    pub total_height: f32,
    pub x_margin: f32,
    pub y_margin: f32,
}

impl BoardLayout {
    /// Center a board of the default cell size in the viewport.
    pub fn new(size: usize, viewport: Vec2) -> Self {
        Self::with_metrics(size, viewport, CellMetrics::from_edge(CELL_EDGE))
    }

    pub fn with_metrics(size: usize, viewport: Vec2, metrics: CellMetrics) -> Self {
        let n = size as f32;
        let total_width = n * metrics.width + n * metrics.width / 2.0;
        let total_height = n * (metrics.short_radius + metrics.edge);
        Self {
            size,
            metrics,
            total_width,
            total_height,
            x_margin: (viewport.0 - total_width) / 2.0,
            y_margin: (viewport.1 - total_height) / 2.0,
        }
    }

    /// Top-left anchor of the cell at `(col, row)`; each row shifts
    /// down-right by half a cell width.
    pub fn cell_origin(&self, col: usize, row: usize) -> Vec2 {
        let m = &self.metrics;
        (
            self.x_margin + col as f32 * m.width + row as f32 * m.width / 2.0,
            self.y_margin + row as f32 * (m.short_radius + m.edge),
        )
    }

    /// Center of the cell at `(col, row)`, where stones and markers sit.
    pub fn cell_center(&self, col: usize, row: usize) -> Vec2 {
        let (ox, oy) = self.cell_origin(col, row);
        (ox + self.metrics.width / 2.0, oy + self.metrics.height / 2.0)
    }

    /// The six vertices of the cell hexagon, starting at the lower-left
    /// and walking over the top to the bottom point.
    pub fn cell_polygon(&self, col: usize, row: usize) -> [Vec2; 6] {
        let (ox, oy) = self.cell_origin(col, row);
        let m = &self.metrics;
        let (a, b, c) = (m.short_radius, m.half_width, m.edge);
        [
            (ox, oy + a + c),
            (ox, oy + a),
            (ox + b, oy),
            (ox + 2.0 * b, oy + a),
            (ox + 2.0 * b, oy + a + c),
            (ox + b, oy + 2.0 * c),
        ]
    }

    /// Sample the four border rails from the per-column hexagon halves.
    ///
    /// The last point of the left rail and the first point of the right
    /// rail duplicate a corner vertex and are trimmed.
    pub fn rails(&self) -> Rails {
        let m = &self.metrics;
        let (a, b, c, w) = (m.short_radius, m.half_width, m.edge, m.width);
        let (xm, ym) = (self.x_margin, self.y_margin);
        let n = self.size;

        let mut top = Vec::with_capacity(3 * n);
        let mut bottom = Vec::with_capacity(3 * n);
        let mut left = Vec::with_capacity(3 * n);
        let mut right = Vec::with_capacity(3 * n);
        for i in 0..n {
            let fi = i as f32;

            let x_off = xm + fi * w;
            top.push((x_off, ym + a));
            top.push((x_off + b, ym));
            top.push((x_off + 2.0 * b, ym + a));

            let x_off = xm + fi * w + (n - 1) as f32 * (w / 2.0);
            let y_off = ym + self.total_height - m.height + RAIL_WIDTH;
            bottom.push((x_off, y_off + a + c));
            bottom.push((x_off + b, y_off + 2.0 * c));
            bottom.push((x_off + 2.0 * b, y_off + a + c));

            let x_off = xm + fi * (w / 2.0);
            let y_off = ym + fi * (2.0 * c - a);
            left.push((x_off, y_off + a));
            left.push((x_off, y_off + a + c));
            left.push((x_off + b, y_off + 2.0 * c));

            let x_off = xm + (n - 1) as f32 * w + fi * (w / 2.0);
            let y_off = ym + fi * (a + c);
            right.push((x_off + b, y_off));
            right.push((x_off + 2.0 * b, y_off + a));
            right.push((x_off + 2.0 * b, y_off + a + c));
        }
        left.pop();
        right.remove(0);
        Rails {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Display letter for a column; `i` is skipped by convention.
    pub fn column_label(col: usize) -> char {
        let mut letter = b'a' + col as u8;
        if letter >= b'i' {
            letter += 1;
        }
        letter as char
    }

    /// Anchor for a column label: the text hangs above this point.
    pub fn column_label_anchor(&self, col: usize) -> Vec2 {
        (
            self.x_margin + col as f32 * self.metrics.width,
            self.y_margin,
        )
    }

    /// Anchor for a row label: the text ends left of this point. Row labels
    /// follow the left rail's slope down the board.
    pub fn row_label_anchor(&self, row: usize) -> Vec2 {
        let m = &self.metrics;
        (
            self.x_margin - LABEL_PAD + row as f32 * (m.width / 2.0),
            self.y_margin + row as f32 * (2.0 * m.edge - m.short_radius) + LABEL_PAD,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_deterministic() {
        let a = BoardLayout::new(9, (400.0, 400.0));
        let b = BoardLayout::new(9, (400.0, 400.0));
        assert_eq!(a, b);
        assert_eq!(a.rails(), b.rails());
    }

    #[test]
    fn widening_the_viewport_only_moves_the_horizontal_margin() {
        let narrow = BoardLayout::new(9, (400.0, 400.0));
        let wide = BoardLayout::new(9, (800.0, 400.0));
        assert_eq!(narrow.y_margin, wide.y_margin);
        assert_eq!(narrow.total_width, wide.total_width);
        assert!((wide.x_margin - narrow.x_margin - 200.0).abs() < 1e-3);
    }

    #[test]
    fn rows_stagger_by_half_a_cell() {
        let layout = BoardLayout::new(9, (400.0, 400.0));
        let (x0, y0) = layout.cell_origin(3, 0);
        let (x1, y1) = layout.cell_origin(3, 1);
        assert!((x1 - x0 - layout.metrics.width / 2.0).abs() < 1e-3);
        assert!((y1 - y0 - (layout.metrics.short_radius + layout.metrics.edge)).abs() < 1e-3);
    }

    #[test]
    fn rails_are_trimmed_at_the_shared_corners() {
        let layout = BoardLayout::new(9, (400.0, 400.0));
        let rails = layout.rails();
        assert_eq!(rails.top.len(), 27);
        assert_eq!(rails.bottom.len(), 27);
        assert_eq!(rails.left.len(), 26);
        assert_eq!(rails.right.len(), 26);
    }

    #[test]
    fn column_labels_skip_i() {
        let labels: String = (0..10).map(BoardLayout::column_label).collect();
        assert_eq!(labels, "abcdefghjk");
        assert!(!labels.contains('i'));
    }

    #[test]
    fn hexagon_is_symmetric_about_its_center() {
        let layout = BoardLayout::new(9, (400.0, 400.0));
        let polygon = layout.cell_polygon(2, 4);
        let (cx, cy) = layout.cell_center(2, 4);
        for (x, y) in polygon {
            let (mx, my) = (2.0 * cx - x, 2.0 * cy - y);
            assert!(
                polygon
                    .iter()
                    .any(|&(px, py)| (px - mx).abs() < 1e-3 && (py - my).abs() < 1e-3),
                "vertex ({x}, {y}) has no mirror across the center"
            );
        }
    }
}
