//! Inspect command - distance statistics for tuning the cut multiplier

use super::{feature_file_for, ConfigArgs};
use anyhow::{Context as _, Result};
use clap::Args;
use shot_boundary_detector::{analyze_distances, compute_distances, load_feature_matrix};
use std::path::PathBuf;

#[derive(Args)]
pub struct InspectCommand {
    /// Video path (or feature file ending in _frames.txt)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Number of largest distances to list
    #[arg(long, default_value = "10")]
    top: usize,
}

impl InspectCommand {
    pub fn execute(self) -> Result<()> {
        let config = self.config.build()?;
        let feature_file = feature_file_for(&self.input);

        let matrix = load_feature_matrix(&feature_file, &config)
            .with_context(|| format!("Failed to load {}", feature_file.display()))?;
        let series = compute_distances(&matrix);
        let result = analyze_distances(&series, &config)?;

        println!("Feature file: {}", feature_file.display());
        println!(
            "Matrix: {} frames x {} columns (frames {}-{})",
            matrix.frames(),
            matrix.columns(),
            result.window.start_frame,
            result.window.end_frame
        );
        println!(
            "Distances: mean {:.3}, std {:.3} over {} samples",
            result.stats.mean, result.stats.std_dev, result.stats.samples
        );
        println!(
            "Thresholds: cut {:.3} (K={}), transition {:.3}, min run {}",
            result.thresholds.cut,
            config.cut_multiplier,
            result.thresholds.transition,
            result.thresholds.min_run_length
        );
        println!(
            "Boundaries: {} cuts, {} transitions",
            result.num_cuts, result.num_transitions
        );

        let mut ranked: Vec<(usize, f64)> = series.iter_scan().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        println!();
        println!("Largest distances:");
        for (slot, distance) in ranked.into_iter().take(self.top) {
            let ratio = if result.thresholds.cut > 0.0 {
                distance / result.thresholds.cut
            } else {
                f64::INFINITY
            };
            println!(
                "  frame {:>6}: {:>12.3} ({:.2}x cut threshold)",
                slot as u64 + 1 + config.frame_offset,
                distance,
                ratio
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shot_boundary_detector::{save_feature_matrix, FeatureMatrix};

    fn small_config_args() -> ConfigArgs {
        ConfigArgs {
            frames: Some(10),
            columns: Some(2),
            cut_multiplier: Some(1.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_execute_reports_existing_and_missing_input() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let bins = [0.0, 0.0, 0.0, 4.0, 8.0, 12.0, 12.0, 12.0, 12.0, 12.0];
        let rows: Vec<Vec<f64>> = bins.iter().map(|&bin| vec![76800.0, bin]).collect();
        let matrix = FeatureMatrix::from_rows(&rows).unwrap();
        save_feature_matrix(&temp_dir.path().join("clip.avi_frames.txt"), &matrix, ',').unwrap();

        let ok = InspectCommand {
            input: temp_dir.path().join("clip.avi"),
            config: small_config_args(),
            top: 3,
        };
        assert!(ok.execute().is_ok());

        let missing = InspectCommand {
            input: temp_dir.path().join("missing.avi"),
            config: small_config_args(),
            top: 3,
        };
        assert!(missing.execute().is_err());
    }
}
