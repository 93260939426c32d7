//! Shot boundary detection using twin-comparison on per-frame histograms
//!
//! This module finds the frames that begin a new shot in an analysis window,
//! given one intensity-histogram feature vector per frame.
//!
//! # Algorithm
//! 1. Load the feature matrix from a delimited text source
//! 2. Compute the L1 distance between consecutive frames (diagnostic column excluded)
//! 3. Derive a cut threshold (`mean + std * K`) and a transition threshold (`mean * 2`)
//! 4. Flag every distance at or above the cut threshold as a cut
//! 5. Scan for plateaus of moderate distance that add up to a cut-sized change
//!    (gradual transitions)
//! 6. Merge both lists in frame order
//!
//! # Example
//! ```no_run
//! use shot_boundary_detector::{detect_shots, ShotDetectorConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ShotDetectorConfig::default();
//! let result = detect_shots(Path::new("match.avi_frames.txt"), &config)?;
//!
//! for boundary in &result.boundaries {
//!     println!("{} at frame {}", boundary.kind, boundary.frame);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cuts;
pub mod distance;
pub mod loader;
pub mod matrix;
pub mod merge;
pub mod segments;
pub mod thresholds;
pub mod transitions;

pub use config::ShotDetectorConfig;
pub use distance::{compute_distances, DistanceSeries};
pub use loader::{
    load_feature_matrix, read_feature_matrix, save_feature_matrix, write_feature_matrix,
};
pub use matrix::FeatureMatrix;
pub use shot_boundary_common::{AnalysisWindow, BoundaryFrame, BoundaryKind, Shot};
pub use thresholds::{estimate_thresholds, DistanceStats, Thresholds};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors specific to shot detection
#[derive(Error, Debug)]
pub enum ShotDetectionError {
    #[error("Feature source not found: {path}")]
    MissingSource {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed feature input at token {token_index}: {reason}")]
    MalformedInput { token_index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result of shot detection over one analysis window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotDetectionResult {
    /// Number of analyzed frames
    pub frame_count: usize,

    /// Frames covered by the analysis
    pub window: AnalysisWindow,

    /// Statistics of the frame distances
    pub stats: DistanceStats,

    /// Thresholds the detectors used
    pub thresholds: Thresholds,

    /// Shot boundaries in frame order (cuts and transitions, not deduplicated)
    pub boundaries: Vec<BoundaryFrame>,

    /// Number of cut boundaries
    pub num_cuts: usize,

    /// Number of gradual transition boundaries
    pub num_transitions: usize,

    /// Configuration used for detection
    pub config: ShotDetectorConfig,
}

impl ShotDetectionResult {
    /// Frame numbers of every boundary, in order
    #[must_use]
    pub fn first_frames(&self) -> Vec<u64> {
        self.boundaries.iter().map(|b| b.frame).collect()
    }

    /// Boundary frames with the window start prepended as the first shot's anchor
    #[must_use]
    pub fn anchored_first_frames(&self) -> Vec<u64> {
        std::iter::once(self.window.start_frame)
            .chain(self.boundaries.iter().map(|b| b.frame))
            .collect()
    }

    /// Shots covering the window
    #[must_use]
    pub fn shots(&self) -> Vec<Shot> {
        segments::segment_shots(self.window, &self.boundaries)
    }
}

/// Run the detection pipeline on an in-memory feature matrix
///
/// Pure and deterministic: the same matrix and configuration always give
/// the same result.
///
/// # Errors
///
/// Returns `InvalidConfig` if the configuration does not validate or the
/// frame numbers of this matrix would overflow past `frame_offset`.
pub fn analyze(
    matrix: &FeatureMatrix,
    config: &ShotDetectorConfig,
) -> Result<ShotDetectionResult, ShotDetectionError> {
    analyze_distances(&compute_distances(matrix), config)
}

/// Run threshold estimation and both detectors on a precomputed distance series
///
/// The series holds `frames + 1` slots, as produced by [`compute_distances`].
///
/// # Errors
///
/// Same as [`analyze`].
pub fn analyze_distances(
    series: &DistanceSeries,
    config: &ShotDetectorConfig,
) -> Result<ShotDetectionResult, ShotDetectionError> {
    let frames = series.len().saturating_sub(1);
    config.validate()?;
    config.check_frame_range(frames)?;

    let (stats, thresholds) = estimate_thresholds(series, config);

    let cuts = cuts::detect_cuts(series, &thresholds, config.frame_offset);
    let transitions = transitions::detect_transitions(series, &thresholds, config.frame_offset);
    let num_cuts = cuts.len();
    let num_transitions = transitions.len();

    let boundaries = merge::merge_boundaries(cuts, transitions);

    info!(
        "Detected {} shot boundaries ({} cuts, {} transitions) over {} frames",
        boundaries.len(),
        num_cuts,
        num_transitions,
        frames
    );

    Ok(ShotDetectionResult {
        frame_count: frames,
        window: AnalysisWindow::new(config.frame_offset, frames),
        stats,
        thresholds,
        boundaries,
        num_cuts,
        num_transitions,
        config: config.clone(),
    })
}

/// Detect shot boundaries from a feature file
///
/// # Arguments
/// * `feature_path` - Delimited feature matrix file
/// * `config` - Configuration for shot detection
///
/// # Example
/// ```no_run
/// use shot_boundary_detector::{detect_shots, ShotDetectorConfig};
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ShotDetectorConfig {
///     cut_multiplier: 8.0,
///     frames: None, // infer the frame count from the file
///     ..Default::default()
/// };
/// let result = detect_shots(Path::new("match.avi_frames.txt"), &config)?;
/// println!("Detected {} shots", result.shots().len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The feature file cannot be opened
/// - The feature file is not a well-formed matrix of the configured shape
pub fn detect_shots(
    feature_path: &Path,
    config: &ShotDetectorConfig,
) -> Result<ShotDetectionResult, ShotDetectionError> {
    config.validate()?;

    info!(
        "Running shot detection on {} (K={}, min run {}, offset {})",
        feature_path.display(),
        config.cut_multiplier,
        config.min_run_length,
        config.frame_offset
    );

    let matrix = load_feature_matrix(feature_path, config)?;
    analyze(&matrix, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_matrix() -> FeatureMatrix {
        // Column 1 steps 0,0,0,4,8,12,12,12,12,12 so distances are 0,0,4,4,4,0,0,0,0
        let bins = [0.0, 0.0, 0.0, 4.0, 8.0, 12.0, 12.0, 12.0, 12.0, 12.0];
        let rows: Vec<Vec<f64>> = bins
            .iter()
            .enumerate()
            .map(|(frame, &bin)| vec![100.0 * frame as f64, bin])
            .collect();
        FeatureMatrix::from_rows(&rows).unwrap()
    }

    fn small_config(cut_multiplier: f64) -> ShotDetectorConfig {
        ShotDetectorConfig {
            frames: Some(10),
            columns: 2,
            cut_multiplier,
            ..Default::default()
        }
    }

    #[test]
    fn test_analyze_finds_transition() {
        let result = analyze(&ramp_matrix(), &small_config(1.5)).unwrap();

        // mean = 12 / 9, sample std = 2
        assert!((result.stats.mean - 4.0 / 3.0).abs() < 1e-12);
        assert!((result.stats.std_dev - 2.0).abs() < 1e-12);
        assert!((result.thresholds.cut - (4.0 / 3.0 + 3.0)).abs() < 1e-12);
        assert!((result.thresholds.transition - 8.0 / 3.0).abs() < 1e-12);

        assert_eq!(result.num_cuts, 0);
        assert_eq!(result.num_transitions, 1);
        assert_eq!(result.boundaries, vec![BoundaryFrame::transition(1005)]);
        assert_eq!(result.anchored_first_frames(), vec![1000, 1005]);
    }

    #[test]
    fn test_analyze_rejects_short_plateau_total() {
        // cut = 4/3 + 12 > 12, the plateau total
        let result = analyze(&ramp_matrix(), &small_config(6.0)).unwrap();
        assert!(result.boundaries.is_empty());
        assert_eq!(result.shots().len(), 1);
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let matrix = ramp_matrix();
        let config = small_config(1.5);
        assert_eq!(
            analyze(&matrix, &config).unwrap(),
            analyze(&matrix, &config).unwrap()
        );
    }

    #[test]
    fn test_result_serializes() {
        let result = analyze(&ramp_matrix(), &small_config(1.5)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["boundaries"][0]["kind"], "transition");
        assert_eq!(json["window"]["start_frame"], 1000);
    }

    #[test]
    fn test_analyze_rejects_overflowing_frame_offset() {
        let config = ShotDetectorConfig {
            frames: None,
            frame_offset: u64::MAX,
            ..small_config(1.5)
        };
        let err = analyze(&ramp_matrix(), &config).unwrap_err();
        assert!(matches!(err, ShotDetectionError::InvalidConfig(_)));

        // The last boundary frame offset + frames still fits
        let config = ShotDetectorConfig {
            frame_offset: u64::MAX - 11,
            ..small_config(1.5)
        };
        let result = analyze(&ramp_matrix(), &config).unwrap();
        assert_eq!(result.window.end_frame, u64::MAX - 1);
        assert_eq!(result.first_frames(), vec![u64::MAX - 6]);
    }

    #[test]
    fn test_analyze_distances_matches_analyze() {
        let matrix = ramp_matrix();
        let config = small_config(1.5);
        let series = compute_distances(&matrix);
        assert_eq!(
            analyze_distances(&series, &config).unwrap(),
            analyze(&matrix, &config).unwrap()
        );
    }

    #[test]
    fn test_detect_shots_validates_config() {
        let config = ShotDetectorConfig {
            columns: 1,
            ..Default::default()
        };
        let err = detect_shots(Path::new("unused_frames.txt"), &config).unwrap_err();
        assert!(matches!(err, ShotDetectionError::InvalidConfig(_)));
    }
}
