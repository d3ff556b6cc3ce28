//! Integration tests for kifu-view
//!
//! These exercise the session control surface end to end: record replay
//! with forward/back navigation, weight snapshot mode, and frame
//! composition for both.

use kifu_view::board::Board;
use kifu_view::record::{Color, GameRecord};
use kifu_view::render::{DrawCommand, Rgb};
use kifu_view::session::{Session, StepOutcome};

// =============================================================================
// Helper functions
// =============================================================================

/// Build record text from move values, alternating Black and White.
/// An empty value ("") is a pass.
fn record_text(size: usize, moves: &[&str]) -> String {
    let mut text = format!("(;FF[4]SZ[{size}]PB[Kuro]PW[Shiro]");
    for (i, mv) in moves.iter().enumerate() {
        let key = if i % 2 == 0 { "B" } else { "W" };
        text.push_str(&format!(";{key}[{mv}]"));
    }
    text.push(')');
    text
}

/// A session with a record loaded and the cursor at the root.
fn loaded(size: usize, moves: &[&str]) -> Session {
    let mut session = Session::new();
    session.load_move_record(&record_text(size, moves)).unwrap();
    session
}

/// A three-snapshot weight stream on a 2x2 board, interleaved with noise
/// lines that must be ignored.
fn three_snapshots() -> String {
    let snapshot = |b: [f64; 4]| {
        format!(
            concat!(
                r#"{{"A1": {{"occupant": "empty", "black": {}, "white": 0}}, "#,
                r#""B1": {{"occupant": "empty", "black": {}, "white": 0}}, "#,
                r#""A2": {{"occupant": "empty", "black": {}, "white": 0}}, "#,
                r#""B2": {{"occupant": "empty", "black": {}, "white": 0}}}}"#
            ),
            b[0], b[1], b[2], b[3]
        )
    };
    format!(
        "thinking...\n{}\n{}\nstill thinking\n{}\n",
        snapshot([1.0, 0.0, 0.0, 0.0]),
        snapshot([0.0, 2.0, 0.0, 0.0]),
        snapshot([0.0, 0.0, 3.0, 0.0]),
    )
}

/// Count (polylines, polygons, circles, labels) in a command list.
fn census(commands: &[DrawCommand]) -> (usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0);
    for command in commands {
        match command {
            DrawCommand::Polyline { .. } => counts.0 += 1,
            DrawCommand::Polygon { .. } => counts.1 += 1,
            DrawCommand::Circle { .. } => counts.2 += 1,
            DrawCommand::Label { .. } => counts.3 += 1,
            DrawCommand::Clear { .. } => {}
        }
    }
    counts
}

fn label_texts(commands: &[DrawCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Label { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

const VIEWPORT: (f32, f32) = (400.0, 400.0);

// =============================================================================
// Record navigation: boundaries and restoration
// =============================================================================

#[test]
fn back_at_root_is_always_boundary() {
    let mut session = loaded(9, &["cc", "gg"]);
    for _ in 0..3 {
        assert_eq!(session.step_back(), StepOutcome::Boundary);
    }
    // The failed steps changed nothing.
    assert_eq!(session.board().unwrap(), &Board::new(9));
}

#[test]
fn forward_past_last_move_is_boundary() {
    let mut session = loaded(9, &["cc", "gg"]);
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.step_forward(), StepOutcome::Boundary);
    assert_eq!(session.step_forward(), StepOutcome::Boundary);
}

#[test]
fn forward_then_back_restores_grid_and_marker() {
    let mut session = loaded(9, &["cc", "gg", "ee", "cf"]);
    session.step_forward();
    session.step_forward();
    let before = session.board().unwrap().clone();

    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.step_back(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap(), &before);
}

#[test]
fn walk_to_either_end_and_back_matches_fresh_replay() {
    let text = record_text(9, &["cc", "gg", "ee", "", "cf", "fc"]);
    let record = GameRecord::parse(&text).unwrap();
    let events = record.main_line_events();

    let mut session = Session::new();
    session.load_move_record(&text).unwrap();
    // All the way forward...
    let mut steps = 0;
    while session.step_forward() == StepOutcome::Advanced {
        steps += 1;
    }
    assert_eq!(steps, events.len());
    assert_eq!(
        session.board().unwrap(),
        &Board::replay(9, events.iter())
    );
    // ...and all the way back, via a zig-zag in the middle.
    session.step_back();
    session.step_forward();
    while session.step_back() == StepOutcome::Advanced {}
    assert_eq!(session.board().unwrap(), &Board::new(9));
}

// =============================================================================
// Move decoding
// =============================================================================

#[test]
fn stones_land_with_the_row_axis_flipped() {
    // "ac": col 0, raw row 2, flipped to row 6 on a 9x9 board.
    let mut session = loaded(9, &["ac"]);
    session.step_forward();
    let board = session.board().unwrap();
    assert_eq!(board.get(0, 6), Some(Color::Black));
    assert_eq!(board.last_move(), Some((0, 6)));
}

#[test]
fn pass_advances_without_touching_the_board() {
    let mut session = loaded(9, &["cc", "", "ee"]);
    session.step_forward();
    let occupied = session.board().unwrap().clone();

    // The white pass advances but draws nothing and clears the marker.
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    let board = session.board().unwrap();
    assert_eq!(board.last_move(), None);
    assert_eq!(board.get(2, 6), occupied.get(2, 6));

    // The move after the pass still arrives.
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap().last_move(), Some((4, 4)));
}

#[test]
fn node_without_move_keys_clears_the_marker() {
    let mut session = Session::new();
    session
        .load_move_record("(;SZ[9];B[cc];C[just a comment];W[gg])")
        .unwrap();
    session.step_forward();
    assert_eq!(session.board().unwrap().last_move(), Some((2, 6)));

    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap().last_move(), None);

    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap().last_move(), Some((6, 2)));
}

#[test]
fn out_of_range_moves_are_silently_ignored() {
    // "ff" decodes past the edge of a 5x5 board.
    let mut session = loaded(5, &["ff", "bb"]);
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap(), &Board::new(5));

    // Navigation keeps working past the bad move.
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.board().unwrap().get(1, 3), Some(Color::White));
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[test]
fn failed_load_keeps_the_previous_session() {
    let mut session = loaded(9, &["cc"]);
    session.step_forward();

    assert!(session.load_move_record("(;B[cc]").is_err());
    assert!(session.load_weight_snapshots("not a record\n").is_err());

    // The earlier record is still active and fully navigable.
    let board = session.board().unwrap();
    assert_eq!(board.get(2, 6), Some(Color::Black));
    assert_eq!(session.step_back(), StepOutcome::Advanced);
}

#[test]
fn reload_discards_the_old_position() {
    let mut session = loaded(9, &["cc", "gg"]);
    session.step_forward();
    session.step_forward();

    session.load_move_record(&record_text(5, &["bb"])).unwrap();
    assert_eq!(session.board().unwrap(), &Board::new(5));
    assert_eq!(session.record().unwrap().size(), 5);
}

#[test]
fn empty_session_draws_only_the_background() {
    let session = Session::new();
    let commands = session.draw_commands(VIEWPORT);
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], DrawCommand::Clear { .. }));
}

// =============================================================================
// Weight snapshot mode
// =============================================================================

#[test]
fn snapshot_navigation_clamps_at_both_ends() {
    let mut session = Session::new();
    session.load_weight_snapshots(&three_snapshots()).unwrap();

    assert_eq!(session.snapshot_index(), Some(0));
    assert_eq!(session.step_back(), StepOutcome::Boundary);
    assert_eq!(session.snapshot_index(), Some(0));

    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.step_forward(), StepOutcome::Advanced);
    assert_eq!(session.step_forward(), StepOutcome::Boundary);
    assert_eq!(session.snapshot_index(), Some(2));
    assert_eq!(session.step_forward(), StepOutcome::Boundary);

    assert_eq!(session.step_back(), StepOutcome::Advanced);
    assert_eq!(session.snapshot_index(), Some(1));
}

#[test]
fn heatmap_blends_toward_the_dominant_color() {
    let text = concat!(
        r#"{"A1": {"occupant": "empty", "black": 4.0, "white": 0}, "#,
        r#""B1": {"occupant": "empty", "black": 2.0, "white": 0}, "#,
        r#""A2": {"occupant": "black", "black": 0, "white": 0}, "#,
        r#""B2": {"occupant": "empty", "black": 0, "white": 0}}"#
    );
    let mut session = Session::new();
    session.load_weight_snapshots(text).unwrap();
    let commands = session.draw_commands(VIEWPORT);

    let circle_colors: Vec<Rgb> = commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Circle { color, .. } => Some(*color),
            _ => None,
        })
        .collect();

    // The max cell saturates to full red, the half-max cell blends halfway
    // from the gray fill, the occupied cell is a full-color stone, and the
    // zero cell draws no circle at all.
    assert!(circle_colors.contains(&Rgb(255, 0, 0)));
    assert!(circle_colors.contains(&Rgb(228, 100, 100)));
    assert_eq!(circle_colors.len(), 3);
}

// =============================================================================
// Frame composition
// =============================================================================

#[test]
fn frame_census_matches_the_position() {
    let mut session = loaded(9, &["cc", "gg", "ee"]);
    for _ in 0..3 {
        session.step_forward();
    }
    let commands = session.draw_commands(VIEWPORT);
    let (polylines, polygons, circles, labels) = census(&commands);

    assert_eq!(polylines, 4, "four border rails");
    assert_eq!(polygons, 81, "one hexagon per cell");
    assert_eq!(circles, 4, "three stones plus the last-move marker");
    assert_eq!(labels, 9 + 9 + 2, "columns, rows, and the name banners");
}

#[test]
fn identical_inputs_compose_identical_frames() {
    let mut session = loaded(9, &["cc", "gg"]);
    session.step_forward();
    assert_eq!(session.draw_commands(VIEWPORT), session.draw_commands(VIEWPORT));

    let mut weights = Session::new();
    weights.load_weight_snapshots(&three_snapshots()).unwrap();
    assert_eq!(weights.draw_commands(VIEWPORT), weights.draw_commands(VIEWPORT));
}

#[test]
fn column_labels_never_contain_letter_i() {
    let session = loaded(10, &[]);
    let labels = label_texts(&session.draw_commands(VIEWPORT));
    assert!(!labels.iter().any(|text| text == "i"));
    assert!(labels.iter().any(|text| text == "j"));
    assert!(labels.iter().any(|text| text == "10"));
}

#[test]
fn player_names_reach_the_banner() {
    let session = loaded(9, &["cc"]);
    let labels = label_texts(&session.draw_commands(VIEWPORT));
    assert!(labels.contains(&"Red: Kuro".to_string()));
    assert!(labels.contains(&"Blue: Shiro".to_string()));
}

#[test]
fn board_display_shows_the_position() {
    let mut session = loaded(3, &["ac", "ca"]);
    session.step_forward();
    session.step_forward();
    // "ac" -> (0, 0) after the flip on 3x3; "ca" -> (2, 2).
    let text = session.board().unwrap().to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "X . . ");
    assert_eq!(lines[2], ". . O ");
}
