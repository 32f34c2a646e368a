//! Line segmentation domain — public API.
//!
//! Splits a raster into horizontal text bands using an ink-density
//! projection profile, and crops those bands into standalone images.
//! Knows nothing about recognition.
//!
//! Pipeline: projection → binarize → runs → merge → filter → pad.

mod bands;
mod config;
mod profile;

pub use config::LineSegmenterConfig;

use crate::raster::RasterImage;
use serde::Serialize;
use std::borrow::Cow;

/// A single detected band covering more than this share of the image height
/// is treated as "no useful segmentation".
const DOMINANT_LINE_RATIO: f64 = 0.8;

/// Wider than this (width / height) is assumed to be a single-line strip.
const PANORAMIC_ASPECT: f64 = 15.0;

/// Narrower than this and taller than `TALL_MIN_HEIGHT` is assumed to hold
/// several lines without scanning.
const TALL_ASPECT: f64 = 2.0;
const TALL_MIN_HEIGHT: u32 = 100;

/// Inclusive row range `top..=bottom` within a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineSegment {
    pub top: u32,
    pub bottom: u32,
    pub height: u32,
}

impl LineSegment {
    /// # Panics
    ///
    /// Panics when `bottom < top`.
    pub fn new(top: u32, bottom: u32) -> Self {
        assert!(bottom >= top, "segment bottom {} above top {}", bottom, top);
        Self {
            top,
            bottom,
            height: bottom - top + 1,
        }
    }

    /// Blank rows strictly between this band and a later one.
    pub fn gap_to(&self, next: &LineSegment) -> u32 {
        next.top.saturating_sub(self.bottom + 1)
    }
}

/// Detect horizontal text bands, ordered top to bottom.
///
/// Pure function of the pixel data and `config`.
pub fn detect_lines(image: &RasterImage, config: &LineSegmenterConfig) -> Vec<LineSegment> {
    let profile = profile::horizontal_projection(image, config.ink_threshold);
    let text_rows = profile::binarize(&profile, config.row_ink_threshold(image.width()));
    let runs = profile::text_runs(&text_rows);
    let merged = bands::merge_close(&runs, config.min_gap_height);
    let merged_count = merged.len();
    let kept = bands::drop_short(merged, config.min_line_height);
    let padded = bands::pad(&kept, config.line_padding, image.height());

    log::debug!(
        "[SEGMENT] {}x{}: {} raw runs, {} merged, {} kept",
        image.width(),
        image.height(),
        runs.len(),
        merged_count,
        padded.len()
    );

    padded
}

/// Crop each detected band into its own image.
///
/// Falls back to the untouched source (borrowed, no copy) when nothing was
/// detected or when a single band covers most of the image.
pub fn extract_lines<'a>(
    image: &'a RasterImage,
    config: &LineSegmenterConfig,
) -> Vec<Cow<'a, RasterImage>> {
    let segments = detect_lines(image, config);

    match segments.as_slice() {
        [] => {
            log::debug!("[SEGMENT] No bands found, using whole image");
            vec![Cow::Borrowed(image)]
        }
        [only] if f64::from(only.height) > f64::from(image.height()) * DOMINANT_LINE_RATIO => {
            log::debug!(
                "[SEGMENT] Single band covers {}/{} rows, using whole image",
                only.height,
                image.height()
            );
            vec![Cow::Borrowed(image)]
        }
        _ => segments
            .iter()
            .map(|s| Cow::Owned(image.crop_rows(s.top, s.bottom)))
            .collect(),
    }
}

/// Cheap gate deciding whether full segmentation is worth running.
///
/// Rules, first match wins:
/// 1. aspect ratio above 15 → single-line strip, `false`
/// 2. aspect ratio below 2 and taller than 100px → `true` without scanning
/// 3. otherwise more than one detected band
pub fn is_multiline(image: &RasterImage, config: &LineSegmenterConfig) -> bool {
    let aspect = f64::from(image.width()) / f64::from(image.height());

    if aspect > PANORAMIC_ASPECT {
        return false;
    }
    if aspect < TALL_ASPECT && image.height() > TALL_MIN_HEIGHT {
        return true;
    }
    detect_lines(image, config).len() > 1
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White canvas with black rows over `bands` (inclusive ranges).
    fn canvas(width: u32, height: u32, bands: &[(u32, u32)]) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let ink = bands.iter().any(|&(t, b)| y >= t && y <= b);
            let px = if ink { [0, 0, 0, 255] } else { [255, 255, 255, 255] };
            for _ in 0..width {
                pixels.extend_from_slice(&px);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn segment_height_is_inclusive() {
        let s = LineSegment::new(10, 20);
        assert_eq!(s.height, 11);
        assert_eq!(s.gap_to(&LineSegment::new(23, 30)), 2);
    }

    #[test]
    fn detects_separate_bands_in_order() {
        let image = canvas(200, 150, &[(20, 40), (70, 90), (120, 135)]);
        let cfg = LineSegmenterConfig::default().with_line_padding(0);
        let lines = detect_lines(&image, &cfg);
        assert_eq!(
            lines,
            vec![
                LineSegment::new(20, 40),
                LineSegment::new(70, 90),
                LineSegment::new(120, 135),
            ]
        );
    }

    #[test]
    fn band_touching_the_bottom_edge_is_closed() {
        let image = canvas(50, 40, &[(30, 39)]);
        let cfg = LineSegmenterConfig::default().with_line_padding(4);
        assert_eq!(detect_lines(&image, &cfg), vec![LineSegment::new(26, 39)]);
    }

    #[test]
    fn sparse_rows_below_ink_percent_are_not_text() {
        // one dark pixel per row on a 1000px row is 0.1%, under the 0.5% default
        let mut image_pixels = Vec::new();
        for _y in 0..30 {
            for x in 0..1000 {
                let px = if x == 0 { [0, 0, 0, 255] } else { [255, 255, 255, 255] };
                image_pixels.extend_from_slice(&px);
            }
        }
        let image = RasterImage::new(1000, 30, image_pixels);
        assert!(detect_lines(&image, &LineSegmenterConfig::default()).is_empty());
    }

    #[test]
    fn multiple_bands_are_cropped_into_owned_strips() {
        let image = canvas(60, 80, &[(10, 25), (50, 65)]);
        let cfg = LineSegmenterConfig::default().with_line_padding(2);
        let strips = extract_lines(&image, &cfg);

        assert_eq!(strips.len(), 2);
        assert!(strips.iter().all(|s| matches!(s, Cow::Owned(_))));
        assert_eq!(strips[0].height(), 20);
        assert_eq!(strips[0].width(), 60);
        assert_eq!(strips[1].row(0), image.row(48));
    }

    #[test]
    fn dominant_single_band_returns_the_source() {
        let image = canvas(40, 50, &[(2, 47)]);
        let strips = extract_lines(&image, &LineSegmenterConfig::default());
        assert_eq!(strips.len(), 1);
        assert!(matches!(strips[0], Cow::Borrowed(_)));
    }

    #[test]
    fn small_single_band_is_still_cropped() {
        let image = canvas(40, 100, &[(40, 55)]);
        let strips = extract_lines(&image, &LineSegmenterConfig::default());
        assert_eq!(strips.len(), 1);
        assert!(matches!(strips[0], Cow::Owned(_)));
        assert_eq!(strips[0].height(), 24);
    }

    #[test]
    fn gate_rules_short_circuit_in_order() {
        let cfg = LineSegmenterConfig::default();
        // 25:1 strip with two clear bands is still single-line
        let strip = canvas(1000, 40, &[(2, 12), (25, 35)]);
        assert!(!is_multiline(&strip, &cfg));
        // tall blank image counts as multiline without scanning
        assert!(is_multiline(&canvas(50, 300, &[]), &cfg));
        // in-between shapes scan
        assert!(is_multiline(&canvas(300, 80, &[(5, 20), (40, 60)]), &cfg));
        assert!(!is_multiline(&canvas(300, 80, &[(30, 50)]), &cfg));
    }
}
