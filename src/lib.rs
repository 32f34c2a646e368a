//! Multiline OCR — line segmentation in front of pluggable recognizers.
//!
//! Backends trained on single text lines cannot read a paragraph. This
//! crate splits a multi-line image into horizontal strips with an
//! ink-density projection profile, feeds each strip to the backend in
//! reading order, and joins the results into document text.
//!
//! Modules:
//!   - raster/      — RGBA image value type, decoding (files, bytes, data URLs)
//!   - segment/     — line detection, extraction, multiline gating
//!   - pipeline.rs  — per-line recognition and reassembly
//!   - ocr/         — recognizer trait, errors, engine wrapper, timeouts
//!   - settings.rs  — settings file + OCR_* environment overrides

pub mod ocr;
pub mod pipeline;
pub mod raster;
pub mod segment;
pub mod settings;

pub use ocr::{BoxError, OcrEngine, OcrError, OcrOutput, Recognizer};
pub use pipeline::{process, process_detailed, ProcessOptions, ProcessReport};
pub use raster::RasterImage;
pub use segment::{detect_lines, extract_lines, is_multiline, LineSegment, LineSegmenterConfig};
pub use settings::OcrSettings;

/// Load `.env.local` (or `.env`) from the working directory and start the
/// `env_logger` backend. Safe to call more than once.
pub fn init() {
    'env_load: for env_file in [".env.local", ".env"] {
        let path = std::path::Path::new(env_file);
        if path.exists() {
            match dotenvy::from_path(path) {
                Ok(_) => eprintln!("[STARTUP] Loaded {}", path.display()),
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
            break 'env_load;
        }
    }

    if env_logger::try_init().is_ok() {
        log::debug!("[STARTUP] Logger initialized");
    }
}
