//! Shot Detect CLI - twin-comparison shot boundary detection
//!
//! Command-line interface over the shot boundary detector.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod commands;
mod parser;

use commands::detect::DetectCommand;
use commands::inspect::InspectCommand;

#[derive(Parser)]
#[command(
    name = "shot-detect",
    version,
    about = "Find shot boundaries (cuts and gradual transitions) from per-frame histograms",
    long_about = "Reads the per-frame intensity histogram matrix written next to a video\n\
                  (<video>_frames.txt) and reports the frames that start a new shot.\n\n\
                  Two thresholds are derived from the frame-to-frame distance statistics:\n  \
                  - cut: mean + std * K, for abrupt changes\n  \
                  - transition: mean * 2, for plateaus of moderate change (dissolves, fades)",
    after_help = "EXAMPLES:\n  \
                  # Detect shots for a video (reads match.avi_frames.txt)\n  \
                  shot-detect detect match.avi\n\n  \
                  # Several videos in parallel, JSON lines output with shot ranges\n  \
                  shot-detect detect --format jsonl --shots a.avi b.avi c.avi\n\n  \
                  # Feature file of unknown length, tab separated, lower cut multiplier\n  \
                  shot-detect detect --infer-frames --delimiter tab --cut-multiplier 8 clip_frames.txt\n\n  \
                  # Print distance statistics to tune the cut multiplier\n  \
                  shot-detect inspect match.avi\n\n\
                  For more details on a specific command:\n  \
                  shot-detect <COMMAND> --help"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect shot boundaries for one or more videos
    Detect(DetectCommand),

    /// Show distance statistics and thresholds for one video
    Inspect(InspectCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match cli.command {
        Commands::Detect(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
    }
}
