//! Delimited feature file reader and writer
//!
//! The producer writes every matrix value as a numeric token separated by a
//! single-character delimiter, in row-major order, with no header. The
//! reference producer emits one long line; one line per frame is accepted
//! too since line breaks only end records.

use crate::config::{ShotDetectorConfig, MIN_FRAMES};
use crate::matrix::FeatureMatrix;
use crate::ShotDetectionError;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Load a feature matrix from a file
///
/// The file handle is scoped to this call and released on every exit path.
///
/// # Errors
///
/// Returns `MissingSource` if the file cannot be opened, and the errors of
/// [`read_feature_matrix`] otherwise.
pub fn load_feature_matrix(
    path: &Path,
    config: &ShotDetectorConfig,
) -> Result<FeatureMatrix, ShotDetectionError> {
    let file = File::open(path).map_err(|source| ShotDetectionError::MissingSource {
        path: path.display().to_string(),
        source,
    })?;

    debug!("Reading feature matrix from {}", path.display());
    read_feature_matrix(BufReader::new(file), config)
}

/// Parse a feature matrix from any delimited token stream
///
/// With `config.frames = Some(n)` exactly `n * columns` tokens are consumed
/// and any surplus is ignored. With `None` the row count is inferred and the
/// token count must be a multiple of `columns`.
///
/// Values are not range-checked: `NaN` and `inf` tokens parse and flow into
/// the distance series unchanged.
///
/// # Errors
///
/// Returns `InvalidConfig` if the configuration does not validate or the
/// inferred frame count overflows the frame numbering, and `MalformedInput`
/// (with the offending token index) if a token is not a number or the
/// stream ends early.
pub fn read_feature_matrix<R: Read>(
    reader: R,
    config: &ShotDetectorConfig,
) -> Result<FeatureMatrix, ShotDetectionError> {
    config.validate()?;
    let columns = config.columns;
    // validate() has checked the product for an explicit frame count
    let expected = config
        .frames
        .and_then(|frames| frames.checked_mul(columns));

    // Tokens are bare numbers, quote characters get no special meaning
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .delimiter(config.delimiter_byte())
        .from_reader(reader);

    let mut values: Vec<f64> = Vec::new();
    let mut surplus = 0usize;

    for record in csv_reader.records() {
        let record = record.map_err(|e| csv_error(e, values.len()))?;
        let field_count = record.len();

        for (position, field) in record.iter().enumerate() {
            // A delimiter right before the line break leaves an empty last field
            if field.is_empty() && position + 1 == field_count {
                continue;
            }
            if expected.is_some_and(|expected| values.len() == expected) {
                surplus += 1;
                continue;
            }

            let value = field
                .parse::<f64>()
                .map_err(|_| ShotDetectionError::MalformedInput {
                    token_index: values.len(),
                    reason: format!("'{field}' is not a number"),
                })?;
            values.push(value);
        }
    }

    if surplus > 0 {
        warn!(
            "Ignoring {} tokens beyond the expected {} values",
            surplus,
            values.len()
        );
    }

    let frames = match config.frames {
        Some(frames) => {
            let expected = expected.unwrap_or(usize::MAX);
            if values.len() < expected {
                return Err(ShotDetectionError::MalformedInput {
                    token_index: values.len(),
                    reason: format!(
                        "stream ended after {} tokens, expected {expected} ({frames}x{columns})",
                        values.len()
                    ),
                });
            }
            frames
        }
        None => {
            if values.len() % columns != 0 {
                return Err(ShotDetectionError::MalformedInput {
                    token_index: values.len(),
                    reason: format!(
                        "{} tokens do not divide into rows of {columns}",
                        values.len()
                    ),
                });
            }
            let frames = values.len() / columns;
            if frames < MIN_FRAMES {
                return Err(ShotDetectionError::MalformedInput {
                    token_index: values.len(),
                    reason: format!("found {frames} frames, need at least {MIN_FRAMES}"),
                });
            }
            config.check_frame_range(frames)?;
            frames
        }
    };

    debug!("Parsed {}x{} feature matrix", frames, columns);
    FeatureMatrix::from_row_major(frames, columns, values)
}

/// Write a feature matrix in the delimited format, one record per frame
///
/// Integral values are written without a fractional part, so histogram
/// counts look the same as the reference producer's output.
pub fn write_feature_matrix<W: Write>(
    writer: W,
    matrix: &FeatureMatrix,
    delimiter: char,
) -> Result<(), ShotDetectionError> {
    let delimiter = u8::try_from(delimiter).map_err(|_| {
        ShotDetectionError::InvalidConfig(format!(
            "delimiter must be an ASCII character, got {delimiter:?}"
        ))
    })?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(writer);

    for row in matrix.rows() {
        csv_writer
            .write_record(row.iter().map(|value| format_value(*value)))
            .map_err(|e| csv_error(e, 0))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a feature matrix to a file, replacing any existing content
pub fn save_feature_matrix(
    path: &Path,
    matrix: &FeatureMatrix,
    delimiter: char,
) -> Result<(), ShotDetectionError> {
    let file = File::create(path)?;
    write_feature_matrix(BufWriter::new(file), matrix, delimiter)?;
    debug!(
        "Wrote {}x{} feature matrix to {}",
        matrix.frames(),
        matrix.columns(),
        path.display()
    );
    Ok(())
}

fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

fn csv_error(err: csv::Error, token_index: usize) -> ShotDetectionError {
    if err.is_io_error() {
        ShotDetectionError::IoError(err.into())
    } else {
        ShotDetectionError::MalformedInput {
            token_index,
            reason: err.to_string(),
        }
    }
}
