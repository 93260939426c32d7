//! Abrupt cut detection

use crate::distance::DistanceSeries;
use crate::thresholds::Thresholds;
use shot_boundary_common::BoundaryFrame;
use tracing::debug;

/// Flag every distance at or above the cut threshold
///
/// The distance at slot `i` measures the change into frame `i + 1` of the
/// window, so the cut is reported at absolute frame `i + 1 + frame_offset`
/// (saturating at `u64::MAX`).
#[must_use]
pub fn detect_cuts(
    series: &DistanceSeries,
    thresholds: &Thresholds,
    frame_offset: u64,
) -> Vec<BoundaryFrame> {
    series
        .iter_scan()
        .filter(|&(_, distance)| distance >= thresholds.cut)
        .map(|(index, distance)| {
            let frame = (index as u64 + 1).saturating_add(frame_offset);
            debug!("Cut at frame {} (distance={:.3})", frame, distance);
            BoundaryFrame::cut(frame)
        })
        .collect()
}
