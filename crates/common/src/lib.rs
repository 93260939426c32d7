/// Common types shared by the shot boundary detector and its consumers
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a shot boundary was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Abrupt change between two consecutive frames
    Cut,
    /// Gradual change spread over several frames (dissolve, fade)
    Transition,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryKind::Cut => write!(f, "cut"),
            BoundaryKind::Transition => write!(f, "transition"),
        }
    }
}

/// First frame of a new shot, in absolute video frame numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryFrame {
    pub frame: u64,
    pub kind: BoundaryKind,
}

impl BoundaryFrame {
    #[must_use]
    pub fn cut(frame: u64) -> Self {
        Self {
            frame,
            kind: BoundaryKind::Cut,
        }
    }

    #[must_use]
    pub fn transition(frame: u64) -> Self {
        Self {
            frame,
            kind: BoundaryKind::Transition,
        }
    }
}

/// Range of absolute frames covered by one analysis run
///
/// The window usually starts mid-stream, so `start_frame` is the offset
/// applied to every boundary the detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start_frame: u64,
    /// Last frame of the window (inclusive)
    pub end_frame: u64,
}

impl AnalysisWindow {
    #[must_use]
    pub fn new(start_frame: u64, frame_count: usize) -> Self {
        Self {
            start_frame,
            end_frame: start_frame.saturating_add(frame_count as u64),
        }
    }

    #[must_use]
    pub fn contains(&self, frame: u64) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame)
    }
}

/// A contiguous run of frames between two shot boundaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub start_frame: u64,
    /// Last frame of the shot (inclusive)
    pub end_frame: u64,
    pub frame_count: u64,
    /// Boundary that opened this shot (`None` for the window anchor)
    pub boundary: Option<BoundaryKind>,
}
