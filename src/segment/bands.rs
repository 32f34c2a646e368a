//! Band post-processing: merge close runs, drop noise, pad.

use super::LineSegment;

/// Fold runs whose blank gap is strictly below `min_gap_height` into the
/// band above them. Input must be ordered top to bottom.
pub(crate) fn merge_close(runs: &[LineSegment], min_gap_height: u32) -> Vec<LineSegment> {
    let mut merged: Vec<LineSegment> = Vec::with_capacity(runs.len());

    for &run in runs {
        match merged.last_mut() {
            Some(current) if current.gap_to(&run) < min_gap_height => {
                *current = LineSegment::new(current.top, run.bottom.max(current.bottom));
            }
            _ => merged.push(run),
        }
    }

    merged
}

/// Drop bands shorter than `min_line_height`.
pub(crate) fn drop_short(bands: Vec<LineSegment>, min_line_height: u32) -> Vec<LineSegment> {
    bands
        .into_iter()
        .filter(|band| band.height >= min_line_height)
        .collect()
}

/// Grow each band by `padding` rows on both sides, clamped to
/// `[0, image_height - 1]`.
pub(crate) fn pad(bands: &[LineSegment], padding: u32, image_height: u32) -> Vec<LineSegment> {
    let last_row = image_height.saturating_sub(1);
    bands
        .iter()
        .map(|band| {
            LineSegment::new(
                band.top.saturating_sub(padding),
                band.bottom.saturating_add(padding).min(last_row),
            )
        })
        .collect()
}
