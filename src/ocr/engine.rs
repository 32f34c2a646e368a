//! A named recognition backend plus the settings it runs with.
//!
//! Line-trained backends get segmented strips; page-level backends always
//! receive the whole image.

use super::{OcrError, Recognizer};
use crate::pipeline;
use crate::raster::{self, RasterImage};
use crate::settings::OcrSettings;
use serde::Serialize;

/// Result of recognizing one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrOutput {
    pub text: String,
    pub char_count: usize,
    /// Lines in the assembled text.
    pub line_count: usize,
    /// Whether the image was split into strips before recognition.
    pub segmented: bool,
    pub latency_ms: f64,
    /// Which backend produced this result.
    pub backend: String,
}

pub struct OcrEngine<R> {
    name: String,
    recognizer: R,
    line_trained: bool,
    settings: OcrSettings,
}

impl<R: Recognizer> OcrEngine<R> {
    /// A page-level backend with default settings.
    pub fn new(name: impl Into<String>, recognizer: R) -> Self {
        Self {
            name: name.into(),
            recognizer,
            line_trained: false,
            settings: OcrSettings::default(),
        }
    }

    /// Mark the backend as trained on single text lines.
    pub fn line_trained(mut self, line_trained: bool) -> Self {
        self.line_trained = line_trained;
        self
    }

    pub fn with_settings(mut self, settings: OcrSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &OcrSettings {
        &self.settings
    }

    /// Whether this engine segments multi-line images.
    pub fn segments_lines(&self) -> bool {
        self.line_trained && self.settings.multiline
    }

    pub async fn recognize_image(&self, image: &RasterImage) -> Result<OcrOutput, OcrError> {
        let start = std::time::Instant::now();
        let mut options = self.settings.process_options();
        options.multiline = self.segments_lines();

        let report = pipeline::process_detailed(image, &self.recognizer, &options).await?;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let output = OcrOutput {
            char_count: report.text.chars().count(),
            line_count: report.text.lines().count(),
            segmented: report.segmented,
            text: report.text,
            latency_ms,
            backend: self.name.clone(),
        };
        log::info!(
            "[OCR] {}: {} chars, {} line(s) in {:.1}ms (segmented={})",
            self.name,
            output.char_count,
            output.line_count,
            output.latency_ms,
            output.segmented
        );
        Ok(output)
    }

    /// Decode encoded bytes (PNG, JPEG, ...) and recognize them.
    pub async fn recognize_bytes(&self, bytes: &[u8]) -> Result<OcrOutput, OcrError> {
        let image = raster::decode_bytes(bytes)?;
        self.recognize_image(&image).await
    }

    /// Recognize a `data:image/...;base64,` URL.
    pub async fn recognize_data_url(&self, url: &str) -> Result<OcrOutput, OcrError> {
        let image = raster::decode_data_url(url)?;
        self.recognize_image(&image).await
    }
}
