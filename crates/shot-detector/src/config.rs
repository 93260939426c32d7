//! Tunable parameters for twin-comparison shot detection

use crate::ShotDetectionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Smallest matrix for which a sample standard deviation is defined
pub const MIN_FRAMES: usize = 3;

/// Configuration for shot boundary detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotDetectorConfig {
    /// Number of analyzed frames (matrix rows)
    /// `None` infers the row count from the number of tokens in the source
    /// Default: 4000
    pub frames: Option<usize>,

    /// Length of each feature vector (matrix columns)
    /// Index 0 holds a diagnostic value and is excluded from distances
    /// Default: 26 (frame size + 25 intensity bins)
    pub columns: usize,

    /// Token separator in the feature file (line breaks always separate too)
    /// Default: ','
    pub delimiter: char,

    /// Outlier multiplier `K` in `cut = mean + std * K`
    /// Higher values = fewer cuts detected
    /// Default: 11.0
    pub cut_multiplier: f64,

    /// Factor applied to the mean to get the transition threshold
    /// Default: 2.0
    pub transition_multiplier: f64,

    /// Consecutive low-dissimilarity samples that end a gradual transition
    /// Default: 2
    pub min_run_length: usize,

    /// Absolute frame number of the first analyzed frame
    /// Default: 1000
    pub frame_offset: u64,
}

impl Default for ShotDetectorConfig {
    fn default() -> Self {
        Self {
            frames: Some(4000),
            columns: 26,
            delimiter: ',',
            cut_multiplier: 11.0,
            transition_multiplier: 2.0,
            min_run_length: 2,
            frame_offset: 1000,
        }
    }
}

impl ShotDetectorConfig {
    /// Load configuration from a YAML file
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_yaml(yaml_path: impl AsRef<Path>) -> Result<Self, ShotDetectionError> {
        let contents = std::fs::read_to_string(yaml_path.as_ref())?;
        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            ShotDetectionError::InvalidConfig(format!("Failed to parse YAML: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a computable analysis
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if:
    /// - fewer than 2 columns (nothing left after the diagnostic slot)
    /// - an explicit frame count below [`MIN_FRAMES`]
    /// - an explicit shape whose token count or frame numbers overflow
    /// - a zero `min_run_length` (a candidate could never close)
    /// - a delimiter that is not a single ASCII character
    /// - a negative or non-finite multiplier
    pub fn validate(&self) -> Result<(), ShotDetectionError> {
        if self.columns < 2 {
            return Err(ShotDetectionError::InvalidConfig(format!(
                "columns must be at least 2, got {}",
                self.columns
            )));
        }
        if let Some(frames) = self.frames {
            if frames < MIN_FRAMES {
                return Err(ShotDetectionError::InvalidConfig(format!(
                    "frames must be at least {MIN_FRAMES}, got {frames}"
                )));
            }
            self.check_frame_range(frames)?;
        }
        if self.min_run_length == 0 {
            return Err(ShotDetectionError::InvalidConfig(
                "min_run_length must be at least 1".to_string(),
            ));
        }
        if !self.delimiter.is_ascii() {
            return Err(ShotDetectionError::InvalidConfig(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )));
        }
        for (name, value) in [
            ("cut_multiplier", self.cut_multiplier),
            ("transition_multiplier", self.transition_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShotDetectionError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a matrix of `frames` rows fits the configured columns and offset
    ///
    /// The token count `frames * columns` and the last reported frame number
    /// `frame_offset + frames + 1` must both be representable.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either computation overflows.
    pub fn check_frame_range(&self, frames: usize) -> Result<(), ShotDetectionError> {
        if frames.checked_mul(self.columns).is_none() {
            return Err(ShotDetectionError::InvalidConfig(format!(
                "{frames} frames of {} columns exceed the addressable token count",
                self.columns
            )));
        }
        let last_frame = u64::try_from(frames)
            .ok()
            .and_then(|frames| frames.checked_add(1))
            .and_then(|span| self.frame_offset.checked_add(span));
        if last_frame.is_none() {
            return Err(ShotDetectionError::InvalidConfig(format!(
                "frame_offset {} leaves no room for {frames} frames",
                self.frame_offset
            )));
        }
        Ok(())
    }

    /// Delimiter as the byte the CSV reader and writer expect
    pub(crate) fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII; fall back to ',' for unvalidated configs
        u8::try_from(self.delimiter).unwrap_or(b',')
    }
}
