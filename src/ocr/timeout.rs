//! Caller-side time limit around a recognizer.
//!
//! The orchestrator has no timeout of its own. Wrapping the recognizer
//! bounds every strip; an expired strip fails like any other recognition
//! failure and takes the whole document down with it.

use super::{BoxError, Recognizer};
use crate::raster::RasterImage;
use std::time::Duration;
use thiserror::Error;

/// A single recognition exceeded its time limit.
#[derive(Debug, Error)]
#[error("Recognition timed out after {}ms", .limit.as_millis())]
pub struct RecognitionTimeout {
    pub limit: Duration,
}

/// Bounds each `recognize` call with `tokio::time::timeout`.
///
/// Needs a Tokio runtime with the time driver enabled.
pub struct TimeoutRecognizer<R> {
    inner: R,
    limit: Duration,
}

impl<R> TimeoutRecognizer<R> {
    pub fn new(inner: R, limit: Duration) -> Self {
        Self { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Recognizer> Recognizer for TimeoutRecognizer<R> {
    async fn recognize(&self, image: &RasterImage) -> Result<String, BoxError> {
        match tokio::time::timeout(self.limit, self.inner.recognize(image)).await {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "[OCR] Recognition of {}x{} strip exceeded {}ms",
                    image.width(),
                    image.height(),
                    self.limit.as_millis()
                );
                Err(Box::new(RecognitionTimeout { limit: self.limit }))
            }
        }
    }
}
