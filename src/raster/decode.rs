//! Decoding encoded images (files, byte buffers, browser data URLs) into
//! `RasterImage`.

use super::RasterImage;
use crate::ocr::OcrError;
use base64::Engine as _;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn data_url_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^data:(?P<mime>image/[A-Za-z0-9.+-]+)?(?P<params>(;[A-Za-z0-9=._-]+)*);base64,")
            .expect("data URL header pattern is valid")
    })
}

/// Decode any format the `image` crate understands (PNG, JPEG, WebP, ...).
pub fn decode_bytes(bytes: &[u8]) -> Result<RasterImage, OcrError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(RasterImage::from(decoded))
}

/// Read and decode an image file.
pub fn open(path: &Path) -> Result<RasterImage, OcrError> {
    let decoded = image::open(path)?;
    log::debug!(
        "[RASTER] Opened {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(RasterImage::from(decoded))
}

/// Decode a `data:image/...;base64,` URL, the shape images take when they
/// come out of a browser canvas or an `<img src>`.
pub fn decode_data_url(url: &str) -> Result<RasterImage, OcrError> {
    let url = url.trim();
    let header = data_url_header()
        .find(url)
        .ok_or_else(|| OcrError::DataUrl("expected data:image/...;base64, prefix".to_string()))?;

    let payload: String = url[header.end()..]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(OcrError::DataUrl("empty payload".to_string()));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| OcrError::DataUrl(format!("invalid base64 payload: {}", e)))?;
    decode_bytes(&bytes)
}
