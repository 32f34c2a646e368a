//! OCR domain — the recognition capability and its error surface.
//!
//! Backends plug in by implementing [`Recognizer`]. The rest of the crate
//! only ever calls `recognize`; it never knows which engine sits behind it.
//! External code should only use the items exported here.

mod engine;
mod timeout;

pub use engine::{OcrEngine, OcrOutput};
pub use timeout::{RecognitionTimeout, TimeoutRecognizer};

use crate::raster::RasterImage;
use std::future::Future;
use thiserror::Error;

/// Failure type recognizers report. Propagated to the caller untouched.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by segmentation-driven recognition.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Recognition failed on line {line} of {total}: {source}")]
    RecognitionFailed {
        line: usize,
        total: usize,
        #[source]
        source: BoxError,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid data URL: {0}")]
    DataUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OcrError {
    /// The recognizer's own error, when this is a recognition failure.
    pub fn recognition_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            OcrError::RecognitionFailed { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

/// A bitmap-to-text backend.
///
/// Implementations may be synchronous underneath; they still present an
/// async surface so suspending engines (workers, accelerators, remote
/// models) fit the same seam.
#[allow(async_fn_in_trait)]
pub trait Recognizer {
    async fn recognize(&self, image: &RasterImage) -> Result<String, BoxError>;
}

/// Any `Fn(&RasterImage) -> Future<Output = Result<String, BoxError>>`
/// closure is a recognizer.
impl<F, Fut> Recognizer for F
where
    F: Fn(&RasterImage) -> Fut,
    Fut: Future<Output = Result<String, BoxError>>,
{
    async fn recognize(&self, image: &RasterImage) -> Result<String, BoxError> {
        self(image).await
    }
}
