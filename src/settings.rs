//! Recognition settings: JSON file plus environment overrides.
//!
//! Stored in `~/.config/multiline-ocr/settings.json`. Every field is
//! defaulted, so a file naming only `segmenter.linePadding` is valid.
//!
//! Resolution order:
//! 1. built-in defaults
//! 2. settings file (missing → defaults, invalid → defaults + warning)
//! 3. `OCR_*` environment variables

use crate::ocr::OcrError;
use crate::pipeline::ProcessOptions;
use crate::segment::LineSegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const APP_DIR: &str = "multiline-ocr";
const SETTINGS_FILENAME: &str = "settings.json";

/// User-facing recognition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrSettings {
    /// Segment multi-line images for line-trained backends.
    pub multiline: bool,
    pub segmenter: LineSegmenterConfig,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            multiline: true,
            segmenter: LineSegmenterConfig::default(),
        }
    }
}

impl OcrSettings {
    pub fn process_options(&self) -> ProcessOptions {
        ProcessOptions {
            multiline: self.multiline,
            config: self.segmenter,
        }
    }
}

/// Full path of the settings file.
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(SETTINGS_FILENAME)
}

/// Settings file + environment.
pub fn load_settings() -> OcrSettings {
    let from_file = load_settings_from(&settings_path());
    apply_env_overrides(from_file, |key| std::env::var(key).ok())
}

/// Load a settings file. Never fails: a missing or unreadable file yields
/// defaults.
pub fn load_settings_from(path: &Path) -> OcrSettings {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return OcrSettings::default(),
    };
    match serde_json::from_str(&raw) {
        Ok(settings) => {
            log::info!("[SETTINGS] Loaded {}", path.display());
            settings
        }
        Err(e) => {
            log::warn!("[SETTINGS] Ignoring invalid {}: {}", path.display(), e);
            OcrSettings::default()
        }
    }
}

/// Persist settings, creating the directory if needed.
pub fn save_settings_to(path: &Path, settings: &OcrSettings) -> Result<(), OcrError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    log::info!("[SETTINGS] Saved {}", path.display());
    Ok(())
}

/// Apply `OCR_*` overrides. `lookup` is `std::env::var` outside tests.
pub fn apply_env_overrides<F>(mut settings: OcrSettings, lookup: F) -> OcrSettings
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("OCR_MULTILINE") {
        match parse_flag(&raw) {
            Some(flag) => settings.multiline = flag,
            None => log::warn!("[SETTINGS] OCR_MULTILINE={:?} is not a boolean", raw),
        }
    }

    let seg = &mut settings.segmenter;
    override_from(&lookup, "OCR_MIN_LINE_HEIGHT", &mut seg.min_line_height);
    override_from(&lookup, "OCR_MIN_GAP_HEIGHT", &mut seg.min_gap_height);
    override_from(&lookup, "OCR_INK_THRESHOLD", &mut seg.ink_threshold);
    override_from(&lookup, "OCR_MIN_ROW_INK_PERCENT", &mut seg.min_row_ink_percent);
    override_from(&lookup, "OCR_LINE_PADDING", &mut seg.line_padding);

    settings
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => {
            log::info!("[SETTINGS] {} override: {}", key, raw.trim());
            *slot = value;
        }
        Err(_) => log::warn!("[SETTINGS] Ignoring unparseable {}={:?}", key, raw),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
