//! Subcommands and the options they share

pub mod detect;
pub mod inspect;

use crate::parser::parse_delimiter;
use anyhow::{Context as _, Result};
use clap::Args;
use shot_boundary_detector::ShotDetectorConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix the feature producer appends to the video path
pub const FEATURE_SUFFIX: &str = "_frames.txt";

/// Detector options: an optional YAML file plus per-field overrides
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// YAML configuration file (fields not set fall back to defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of frames (rows) in the feature file
    #[arg(long)]
    frames: Option<usize>,

    /// Infer the number of frames from the feature file
    #[arg(long, conflicts_with = "frames")]
    infer_frames: bool,

    /// Feature vector length (diagnostic slot + histogram bins)
    #[arg(long)]
    columns: Option<usize>,

    /// Token delimiter: a single character or comma/semicolon/tab/space/pipe
    #[arg(long, value_parser = parse_delimiter)]
    delimiter: Option<char>,

    /// Cut threshold multiplier K (cut = mean + std * K)
    #[arg(long)]
    cut_multiplier: Option<f64>,

    /// Low-distance frames needed to end a gradual transition
    #[arg(long)]
    min_run_length: Option<usize>,

    /// Absolute frame number of the first analyzed frame
    #[arg(long)]
    frame_offset: Option<u64>,
}

impl ConfigArgs {
    /// Build and validate the detector configuration
    pub fn build(&self) -> Result<ShotDetectorConfig> {
        let mut config = match &self.config {
            Some(path) => ShotDetectorConfig::from_yaml(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ShotDetectorConfig::default(),
        };

        if let Some(frames) = self.frames {
            config.frames = Some(frames);
        }
        if self.infer_frames {
            config.frames = None;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if let Some(cut_multiplier) = self.cut_multiplier {
            config.cut_multiplier = cut_multiplier;
        }
        if let Some(min_run_length) = self.min_run_length {
            config.min_run_length = min_run_length;
        }
        if let Some(frame_offset) = self.frame_offset {
            config.frame_offset = frame_offset;
        }

        config
            .validate()
            .context("Invalid detector configuration")?;
        Ok(config)
    }
}

/// Feature file for a video path
///
/// Paths that already end in the feature suffix are used unchanged.
pub fn feature_file_for(input: &Path) -> PathBuf {
    let already_features = input
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(FEATURE_SUFFIX));
    if already_features {
        return input.to_path_buf();
    }

    let mut name = OsString::from(input.as_os_str());
    name.push(FEATURE_SUFFIX);
    PathBuf::from(name)
}
