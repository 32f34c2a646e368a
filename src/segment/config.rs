//! Segmentation thresholds.

use serde::{Deserialize, Serialize};

/// Thresholds for line detection. Built once per call, never mutated.
///
/// Serialized with camelCase keys (`minLineHeight`, `inkThreshold`, ...) and
/// every field defaulted, so a partial JSON object overrides just the keys
/// it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineSegmenterConfig {
    /// Merged bands shorter than this (px) are noise and dropped.
    pub min_line_height: u32,
    /// Bands separated by fewer blank rows than this (px) are merged.
    pub min_gap_height: u32,
    /// Luminance (0-255) below which a pixel counts as ink.
    pub ink_threshold: u8,
    /// Percentage of the row width that must be ink for a text row.
    /// `0.5` means half a percent, not fifty.
    pub min_row_ink_percent: f64,
    /// Rows added above and below each kept band, clamped to the image.
    pub line_padding: u32,
}

impl Default for LineSegmenterConfig {
    fn default() -> Self {
        Self {
            min_line_height: 8,
            min_gap_height: 5,
            ink_threshold: 128,
            min_row_ink_percent: 0.5,
            line_padding: 4,
        }
    }
}

impl LineSegmenterConfig {
    pub fn with_min_line_height(self, px: u32) -> Self {
        Self {
            min_line_height: px,
            ..self
        }
    }

    pub fn with_min_gap_height(self, px: u32) -> Self {
        Self {
            min_gap_height: px,
            ..self
        }
    }

    pub fn with_ink_threshold(self, luminance: u8) -> Self {
        Self {
            ink_threshold: luminance,
            ..self
        }
    }

    pub fn with_min_row_ink_percent(self, percent: f64) -> Self {
        Self {
            min_row_ink_percent: percent,
            ..self
        }
    }

    pub fn with_line_padding(self, px: u32) -> Self {
        Self {
            line_padding: px,
            ..self
        }
    }

    /// Ink pixels a row of `width` must exceed to count as text.
    pub(crate) fn row_ink_threshold(&self, width: u32) -> f64 {
        f64::from(width) * self.min_row_ink_percent / 100.0
    }
}
