//! Combine cut and transition boundaries into one ordered list

use shot_boundary_common::BoundaryFrame;

/// Concatenate both detector outputs and sort by frame
///
/// Nothing is deduplicated: a frame reported by both detectors appears
/// twice. The sort is stable, so on equal frames the cut comes first.
#[must_use]
pub fn merge_boundaries(
    cuts: Vec<BoundaryFrame>,
    transitions: Vec<BoundaryFrame>,
) -> Vec<BoundaryFrame> {
    let mut merged = cuts;
    merged.extend(transitions);
    merged.sort_by_key(|boundary| boundary.frame);
    merged
}
