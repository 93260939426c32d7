//! Detect command - shot boundaries for one or more videos
//!
//! Videos are independent, so several inputs are analyzed in parallel.

use super::{feature_file_for, ConfigArgs};
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use shot_boundary_detector::{
    detect_shots, BoundaryFrame, BoundaryKind, DistanceStats, Shot, ShotDetectionResult,
    Thresholds,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

#[derive(Args)]
pub struct DetectCommand {
    /// Video paths (or feature files ending in _frames.txt)
    #[arg(value_name = "INPUTS", required = true)]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also report the shot ranges between boundaries
    #[arg(long)]
    shots: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// One JSON array with a report per input
    Json,
    /// One JSON object per line
    Jsonl,
}

/// Detection report for one input
#[derive(Debug, Serialize)]
struct VideoReport {
    input: PathBuf,
    feature_file: PathBuf,
    frame_count: usize,
    /// Boundary frames with the window start prepended
    first_frames: Vec<u64>,
    boundaries: Vec<BoundaryFrame>,
    stats: DistanceStats,
    thresholds: Thresholds,
    #[serde(skip_serializing_if = "Option::is_none")]
    shots: Option<Vec<Shot>>,
}

impl VideoReport {
    fn new(
        input: PathBuf,
        feature_file: PathBuf,
        result: &ShotDetectionResult,
        with_shots: bool,
    ) -> Self {
        Self {
            input,
            feature_file,
            frame_count: result.frame_count,
            first_frames: result.anchored_first_frames(),
            boundaries: result.boundaries.clone(),
            stats: result.stats,
            thresholds: result.thresholds,
            shots: with_shots.then(|| result.shots()),
        }
    }
}

impl DetectCommand {
    pub fn execute(self) -> Result<()> {
        let config = self.config.build()?;

        info!("=== Shot Detect ===");
        info!("Total inputs: {}", self.inputs.len());

        let start_time = Instant::now();
        let outcomes: Vec<_> = self
            .inputs
            .par_iter()
            .map(|input| {
                let feature_file = feature_file_for(input);
                let outcome = detect_shots(&feature_file, &config);
                (input.clone(), feature_file, outcome)
            })
            .collect();

        let mut reports = Vec::with_capacity(outcomes.len());
        let mut failed = 0usize;
        for (input, feature_file, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    reports.push(VideoReport::new(input, feature_file, &result, self.shots));
                }
                Err(e) => {
                    failed += 1;
                    error!("Failed {}: {}", input.display(), e);
                    if self.format == OutputFormat::Jsonl {
                        println!(
                            "{}",
                            serde_json::json!({
                                "input": input,
                                "feature_file": feature_file,
                                "status": "error",
                                "error": e.to_string(),
                            })
                        );
                    }
                }
            }
        }

        match self.format {
            OutputFormat::Text => {
                for report in &reports {
                    print_text(report);
                }
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&reports)
                    .context("Failed to serialize reports")?;
                println!("{json}");
            }
            OutputFormat::Jsonl => {
                for report in &reports {
                    let line =
                        serde_json::to_string(report).context("Failed to serialize report")?;
                    println!("{line}");
                }
            }
        }

        info!(
            "Processed {} inputs in {:.3}s ({} succeeded, {} failed)",
            self.inputs.len(),
            start_time.elapsed().as_secs_f64(),
            reports.len(),
            failed
        );

        if failed > 0 {
            anyhow::bail!("{} of {} inputs failed", failed, self.inputs.len());
        }
        Ok(())
    }
}

fn print_text(report: &VideoReport) {
    let cuts = report
        .boundaries
        .iter()
        .filter(|b| b.kind == BoundaryKind::Cut)
        .count();
    println!(
        "{}: {} boundaries ({} cuts, {} transitions) over {} frames",
        report.input.display(),
        report.boundaries.len(),
        cuts,
        report.boundaries.len() - cuts,
        report.frame_count
    );

    let frames: Vec<String> = report.first_frames.iter().map(u64::to_string).collect();
    println!("  first frames: {}", frames.join(", "));

    if let Some(shots) = &report.shots {
        for (i, shot) in shots.iter().enumerate() {
            let opened_by = shot
                .boundary
                .map_or_else(|| "start".to_string(), |kind| kind.to_string());
            println!(
                "  shot #{}: frames {}-{} ({} frames, {})",
                i + 1,
                shot.start_frame,
                shot.end_frame,
                shot.frame_count,
                opened_by
            );
        }
    }
}
