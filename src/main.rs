//! Kifu-View: a Go game-record replayer and heatmap viewer.
//!
//! The real windowing shell owns buttons, a file chooser, and a redraw
//! tick; this binary stands in for it on the command line.
//!
//! ## Usage
//!
//! - `kifu-view record <FILE>` - replay a record and print the final board
//! - `kifu-view weights <FILE>` - load an analysis dump and print a snapshot
//! - `kifu-view demo` - step through a small built-in record

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use kifu_view::constants::DEFAULT_VIEWPORT;
use kifu_view::record::Color;
use kifu_view::render::DrawCommand;
use kifu_view::session::{Session, StepOutcome};

/// Kifu-View: replay and visualize recorded Go games
#[derive(Parser)]
#[command(name = "kifu-view")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded game and print the resulting position
    Record {
        file: PathBuf,
        /// Forward steps to take (default: play out the main line)
        #[arg(long)]
        steps: Option<usize>,
    },
    /// Load an analysis weight dump and print one normalized snapshot
    Weights {
        file: PathBuf,
        /// Snapshot index to show
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Step through a small built-in record
    Demo,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Record { file, steps }) => run_record(&file, steps),
        Some(Commands::Weights { file, index }) => run_weights(&file, index),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_record(file: &Path, steps: Option<usize>) -> anyhow::Result<()> {
    let mut session = Session::new();
    session
        .load_move_record_file(file)
        .with_context(|| format!("loading record {}", file.display()))?;

    let limit = steps.unwrap_or(usize::MAX);
    let mut taken = 0;
    while taken < limit {
        match session.step_forward() {
            StepOutcome::Advanced => taken += 1,
            StepOutcome::Boundary => break,
        }
    }
    info!(moves = taken, "replayed main line");

    if let Some(record) = session.record() {
        println!("Red: {}", record.black_name());
        println!("Blue: {}", record.white_name());
    }
    if let Some(board) = session.board() {
        print!("{board}");
    }
    print_frame_census(&session);
    Ok(())
}

fn run_weights(file: &Path, index: usize) -> anyhow::Result<()> {
    let mut session = Session::new();
    session
        .load_weight_snapshots_file(file)
        .with_context(|| format!("loading weight snapshots {}", file.display()))?;

    let mut reached = 0;
    while reached < index {
        match session.step_forward() {
            StepOutcome::Advanced => reached += 1,
            StepOutcome::Boundary => break,
        }
    }

    if let Some(sequence) = session.snapshots() {
        println!(
            "snapshot {}/{} on a {}x{} board",
            reached + 1,
            sequence.len(),
            sequence.size(),
            sequence.size()
        );
        if let Some(snapshot) = sequence.get(reached) {
            for row in 0..sequence.size() {
                for col in 0..sequence.size() {
                    let ch = match snapshot.occupant(col, row) {
                        Some(Color::Black) => 'X',
                        Some(Color::White) => 'O',
                        None => '.',
                    };
                    print!("{ch} ");
                }
                println!();
            }
        }
    }
    print_frame_census(&session);
    Ok(())
}

fn run_demo() -> anyhow::Result<()> {
    const DEMO_RECORD: &str =
        "(;FF[4]SZ[9]PB[Kuro]PW[Shiro];B[cc];W[gg];B[cf];W[];B[fc])";

    println!("Kifu-View: game record replay demo\n");
    let mut session = Session::new();
    session.load_move_record(DEMO_RECORD)?;

    let mut move_number = 0;
    while session.step_forward() == StepOutcome::Advanced {
        move_number += 1;
        println!("--- move {move_number} ---");
        if let Some(board) = session.board() {
            print!("{board}");
        }
    }
    println!("--- end of main line ---");
    print_frame_census(&session);
    Ok(())
}

/// Summarize the composed frame for the default viewport.
fn print_frame_census(session: &Session) {
    let commands = session.draw_commands(DEFAULT_VIEWPORT);
    let mut polylines = 0;
    let mut polygons = 0;
    let mut circles = 0;
    let mut labels = 0;
    for command in &commands {
        match command {
            DrawCommand::Polyline { .. } => polylines += 1,
            DrawCommand::Polygon { .. } => polygons += 1,
            DrawCommand::Circle { .. } => circles += 1,
            DrawCommand::Label { .. } => labels += 1,
            DrawCommand::Clear { .. } => {}
        }
    }
    println!(
        "frame: {polygons} cells, {circles} circles, {polylines} rails, {labels} labels"
    );
}
