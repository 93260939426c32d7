//! Data-adaptive twin-comparison thresholds
//!
//! Both thresholds come from the mean and sample standard deviation of the
//! distance series. Nothing here guards against `NaN` or infinite
//! distances: they propagate into the thresholds, and every comparison
//! against a `NaN` threshold is false.

use crate::config::ShotDetectorConfig;
use crate::distance::DistanceSeries;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary statistics of the meaningful distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceStats {
    pub mean: f64,
    /// Bessel-corrected sample standard deviation
    pub std_dev: f64,
    /// Number of distances the statistics cover (`frames - 1`)
    pub samples: usize,
}

impl DistanceStats {
    /// Compute mean and sample standard deviation, sentinels excluded
    ///
    /// A series with fewer than two samples yields `NaN` for the undefined
    /// terms; [`ShotDetectorConfig::validate`] keeps real runs away from it.
    #[must_use]
    pub fn from_series(series: &DistanceSeries) -> Self {
        let samples = series.samples();
        let count = samples.len();

        let mean = samples.iter().sum::<f64>() / count as f64;
        let squared_deviation: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
        let std_dev = (squared_deviation / (count as f64 - 1.0)).sqrt();

        Self {
            mean,
            std_dev,
            samples: count,
        }
    }
}

/// Detection thresholds, fixed for the whole scan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Distances at or above this are cuts
    pub cut: f64,
    /// Distances at or above this (and below `cut`) may be part of a transition
    pub transition: f64,
    /// Consecutive samples below `transition` that close a candidate
    pub min_run_length: usize,
}

impl Thresholds {
    /// Derive `cut = mean + std * K` and `transition = mean * 2`
    ///
    /// A static scene gives `mean = std = 0`, so both thresholds are zero and
    /// every distance counts as a cut.
    #[must_use]
    pub fn from_stats(stats: &DistanceStats, config: &ShotDetectorConfig) -> Self {
        Self {
            cut: stats.mean + stats.std_dev * config.cut_multiplier,
            transition: stats.mean * config.transition_multiplier,
            min_run_length: config.min_run_length,
        }
    }
}

/// Estimate statistics and thresholds for one distance series
#[must_use]
pub fn estimate_thresholds(
    series: &DistanceSeries,
    config: &ShotDetectorConfig,
) -> (DistanceStats, Thresholds) {
    let stats = DistanceStats::from_series(series);
    let thresholds = Thresholds::from_stats(&stats, config);

    debug!(
        "Distance mean={:.3} std={:.3} over {} samples -> cut={:.3} transition={:.3}",
        stats.mean, stats.std_dev, stats.samples, thresholds.cut, thresholds.transition
    );

    (stats, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(samples: &[f64]) -> DistanceSeries {
        let mut slots = vec![0.0];
        slots.extend_from_slice(samples);
        slots.push(0.0);
        DistanceSeries::from_slots(slots)
    }

    #[test]
    fn test_stats_ignore_sentinels() {
        let slots = vec![1000.0, 2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 1000.0];
        let stats = DistanceStats::from_series(&DistanceSeries::from_slots(slots));

        assert_eq!(stats.samples, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Sum of squared deviations is 32, sample variance 32 / 7
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_thresholds_follow_formulas() {
        let config = ShotDetectorConfig::default();
        let stats = DistanceStats {
            mean: 3.0,
            std_dev: 0.5,
            samples: 100,
        };
        let thresholds = Thresholds::from_stats(&stats, &config);
        assert_eq!(thresholds.cut, 3.0 + 0.5 * 11.0);
        assert_eq!(thresholds.transition, 6.0);
        assert_eq!(thresholds.min_run_length, 2);
    }

    #[test]
    fn test_static_scene_gives_zero_thresholds() {
        let (stats, thresholds) =
            estimate_thresholds(&series(&[0.0; 10]), &ShotDetectorConfig::default());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(thresholds.cut, 0.0);
        assert_eq!(thresholds.transition, 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        let (_, thresholds) =
            estimate_thresholds(&series(&[1.0, f64::NAN, 2.0]), &ShotDetectorConfig::default());
        assert!(thresholds.cut.is_nan());
        assert!(thresholds.transition.is_nan());
    }
}
