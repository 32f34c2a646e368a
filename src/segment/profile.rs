//! Horizontal projection profile and row binarization.

use super::LineSegment;
use crate::raster::{RasterImage, CHANNELS};

/// ITU-R BT.601 luma. Alpha is ignored.
#[inline]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)
}

/// Ink pixels per row, top to bottom.
pub(crate) fn horizontal_projection(image: &RasterImage, ink_threshold: u8) -> Vec<u32> {
    let threshold = f64::from(ink_threshold);
    image
        .rows()
        .map(|row| {
            row.chunks_exact(CHANNELS)
                .filter(|px| luminance(px[0], px[1], px[2]) < threshold)
                .count() as u32
        })
        .collect()
}

/// A row is text when its ink count strictly exceeds `min_ink`.
pub(crate) fn binarize(profile: &[u32], min_ink: f64) -> Vec<bool> {
    profile.iter().map(|&ink| f64::from(ink) > min_ink).collect()
}

/// Maximal runs of consecutive text rows.
pub(crate) fn text_runs(text_rows: &[bool]) -> Vec<LineSegment> {
    let mut runs = Vec::new();
    let mut start: Option<u32> = None;

    for (y, &is_text) in text_rows.iter().enumerate() {
        let y = y as u32;
        match (is_text, start) {
            (true, None) => start = Some(y),
            (false, Some(top)) => {
                runs.push(LineSegment::new(top, y - 1));
                start = None;
            }
            _ => {}
        }
    }

    // A run still open at the bottom edge ends on the last row.
    if let Some(top) = start {
        runs.push(LineSegment::new(top, text_rows.len() as u32 - 1));
    }

    runs
}
