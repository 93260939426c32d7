//! Split an analysis window into shots

use shot_boundary_common::{AnalysisWindow, BoundaryFrame, BoundaryKind, Shot};

/// Turn sorted boundaries into consecutive shots covering the window
///
/// The window start anchors the first shot. A boundary repeating the start
/// of the current shot (both detectors firing on one frame) does not open
/// an empty shot; the first kind reported is kept.
#[must_use]
pub fn segment_shots(window: AnalysisWindow, boundaries: &[BoundaryFrame]) -> Vec<Shot> {
    let mut shots = Vec::with_capacity(boundaries.len() + 1);
    let mut start = window.start_frame;
    let mut opened_by = None;

    for boundary in boundaries {
        if boundary.frame <= start || boundary.frame > window.end_frame {
            continue;
        }
        shots.push(shot(start, boundary.frame - 1, opened_by));
        start = boundary.frame;
        opened_by = Some(boundary.kind);
    }

    shots.push(shot(start, window.end_frame, opened_by));
    shots
}

fn shot(start_frame: u64, end_frame: u64, boundary: Option<BoundaryKind>) -> Shot {
    Shot {
        start_frame,
        end_frame,
        frame_count: end_frame - start_frame + 1,
        boundary,
    }
}
