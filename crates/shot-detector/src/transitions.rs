//! Gradual transition detection
//!
//! A dissolve or fade shows up as a plateau of distances between the two
//! thresholds. The scanner opens a candidate on the first such sample and
//! closes it once `min_run_length` consecutive samples fall below the
//! transition threshold. A closed candidate becomes a boundary only if the
//! distances it spans, plus the sample just before it, add up to at least
//! the cut threshold. A distance at or above the cut threshold abandons the
//! candidate, since a hard cut inside the run rules out a gradual change.

use crate::distance::DistanceSeries;
use crate::thresholds::Thresholds;
use shot_boundary_common::BoundaryFrame;
use tracing::debug;

/// One distance sample as seen by the scanner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Slot in the distance series
    pub index: usize,
    pub distance: f64,
    /// Distance at the preceding slot (the zero sentinel for slot 1)
    pub previous: f64,
}

/// Scanner state between two samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionState {
    #[default]
    Idle,
    CandidateOpen {
        /// Slot of the first moderate sample
        start: usize,
        /// Consecutive samples below the transition threshold so far
        below: usize,
        /// Sum of the distances from `start - 1` through the last consumed sample
        accumulated: f64,
    },
}

impl TransitionState {
    /// Consume one sample, returning the next state and any emitted boundary
    ///
    /// A boundary is reported at absolute frame `start + 2 + frame_offset`.
    #[must_use]
    pub fn step(
        self,
        sample: Sample,
        thresholds: &Thresholds,
        frame_offset: u64,
    ) -> (Self, Option<BoundaryFrame>) {
        let distance = sample.distance;

        if thresholds.transition <= distance && distance < thresholds.cut {
            let next = match self {
                Self::Idle => Self::CandidateOpen {
                    start: sample.index,
                    below: 0,
                    accumulated: sample.previous + distance,
                },
                Self::CandidateOpen {
                    start, accumulated, ..
                } => Self::CandidateOpen {
                    start,
                    below: 0,
                    accumulated: accumulated + distance,
                },
            };
            return (next, None);
        }

        if distance >= thresholds.cut {
            if let Self::CandidateOpen { start, .. } = self {
                debug!(
                    "Dropping transition candidate from slot {} (cut at slot {})",
                    start, sample.index
                );
            }
            return (Self::Idle, None);
        }

        let Self::CandidateOpen {
            start,
            below,
            accumulated,
        } = self
        else {
            return (Self::Idle, None);
        };

        let below = if distance < thresholds.transition {
            below + 1
        } else {
            // NaN matches no rule and only poisons the running sum
            return (
                Self::CandidateOpen {
                    start,
                    below,
                    accumulated: accumulated + distance,
                },
                None,
            );
        };
        if below < thresholds.min_run_length {
            return (
                Self::CandidateOpen {
                    start,
                    below,
                    accumulated: accumulated + distance,
                },
                None,
            );
        }

        // The closing sample itself is outside the validated span
        if accumulated >= thresholds.cut {
            let frame = (start as u64 + 2).saturating_add(frame_offset);
            debug!(
                "Transition at frame {} (slots {}..{}, sum={:.3})",
                frame, start, sample.index, accumulated
            );
            (Self::Idle, Some(BoundaryFrame::transition(frame)))
        } else {
            debug!(
                "Rejecting transition candidate at slots {}..{} (sum={:.3} < {:.3})",
                start, sample.index, accumulated, thresholds.cut
            );
            (Self::Idle, None)
        }
    }
}

/// Scan a whole distance series for gradual transitions
///
/// A candidate still open when the series ends is discarded.
#[must_use]
pub fn detect_transitions(
    series: &DistanceSeries,
    thresholds: &Thresholds,
    frame_offset: u64,
) -> Vec<BoundaryFrame> {
    let slots = series.as_slice();
    let mut state = TransitionState::Idle;
    let mut found = Vec::new();

    for (index, distance) in series.iter_scan() {
        let sample = Sample {
            index,
            distance,
            previous: slots[index - 1],
        };
        let (next, emitted) = state.step(sample, thresholds, frame_offset);
        state = next;
        found.extend(emitted);
    }

    if let TransitionState::CandidateOpen { start, .. } = state {
        debug!("Discarding unfinished transition candidate from slot {}", start);
    }

    found
}
