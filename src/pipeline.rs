//! Multiline recognition pipeline.
//!
//! gate → segment → recognize each strip in order → trim → drop empty → join.
//!
//! Strips are recognized strictly one after another: reading order is the
//! call order, and at most one recognition is in flight per document.

use crate::ocr::{OcrError, Recognizer};
use crate::raster::RasterImage;
use crate::segment::{self, LineSegmenterConfig};

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessOptions {
    /// Allow segmentation. When false the whole image goes to the
    /// recognizer in one shot.
    pub multiline: bool,
    pub config: LineSegmenterConfig,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            multiline: true,
            config: LineSegmenterConfig::default(),
        }
    }
}

impl ProcessOptions {
    pub fn single_shot() -> Self {
        Self {
            multiline: false,
            ..Self::default()
        }
    }

    pub fn with_config(config: LineSegmenterConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }
}

/// Text plus what the pipeline did to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub text: String,
    /// Whether the image was split into strips.
    pub segmented: bool,
    /// Recognizer calls made.
    pub strips: usize,
    /// Strips that produced non-empty text.
    pub kept: usize,
}

/// Recognize `image`, segmenting it into lines first when that is enabled
/// and looks worthwhile.
///
/// The first recognizer failure aborts the document: nothing already
/// recognized is returned.
pub async fn process<R>(
    image: &RasterImage,
    recognizer: &R,
    options: &ProcessOptions,
) -> Result<String, OcrError>
where
    R: Recognizer,
{
    process_detailed(image, recognizer, options)
        .await
        .map(|report| report.text)
}

/// Same as [`process`], also reporting how the text was produced.
pub async fn process_detailed<R>(
    image: &RasterImage,
    recognizer: &R,
    options: &ProcessOptions,
) -> Result<ProcessReport, OcrError>
where
    R: Recognizer,
{
    if image.width() == 0 || image.height() == 0 {
        return Err(OcrError::InvalidInput(format!(
            "image must have positive dimensions, got {}x{}",
            image.width(),
            image.height()
        )));
    }

    let start = std::time::Instant::now();

    if !options.multiline || !segment::is_multiline(image, &options.config) {
        let text = recognizer
            .recognize(image)
            .await
            .map_err(|source| OcrError::RecognitionFailed {
                line: 1,
                total: 1,
                source,
            })?
            .trim()
            .to_string();
        log::info!(
            "[PIPELINE] Single-shot {}x{}: {} chars in {}ms",
            image.width(),
            image.height(),
            text.len(),
            start.elapsed().as_millis()
        );
        let kept = usize::from(!text.is_empty());
        return Ok(ProcessReport {
            text,
            segmented: false,
            strips: 1,
            kept,
        });
    }

    let strips = segment::extract_lines(image, &options.config);
    let total = strips.len();
    log::info!(
        "[PIPELINE] Segmented {}x{} into {} strip(s) in {}ms",
        image.width(),
        image.height(),
        total,
        start.elapsed().as_millis()
    );

    let mut lines = Vec::with_capacity(total);
    for (index, strip) in strips.iter().enumerate() {
        let raw = recognizer
            .recognize(strip)
            .await
            .map_err(|source| OcrError::RecognitionFailed {
                line: index + 1,
                total,
                source,
            })?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            log::debug!("[PIPELINE] Strip {}/{} produced no text", index + 1, total);
        } else {
            lines.push(trimmed.to_string());
        }
    }

    let kept = lines.len();
    let text = lines.join("\n");
    log::info!(
        "[PIPELINE] Recognized {}/{} strips, {} chars in {}ms",
        kept,
        total,
        text.len(),
        start.elapsed().as_millis()
    );

    Ok(ProcessReport {
        text,
        segmented: true,
        strips: total,
        kept,
    })
}
