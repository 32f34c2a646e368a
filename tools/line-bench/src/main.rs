//! Line segmentation benchmark CLI for multiline-ocr.
//!
//! Runs the gate and line detection over real images and reports what the
//! pipeline would send to a line-trained recognizer. No recognizer needed.
//!
//! Usage:
//!   cargo run -- <image.png>                    Single image, JSON report
//!   cargo run -- <image.png> --crops <dir>      Also write each strip as PNG
//!   cargo run -- --batch <directory>            All images in directory → CSV
//!
//! Thresholds come from the settings file and OCR_* environment variables.

use multiline_ocr::raster;
use multiline_ocr::segment::{detect_lines, extract_lines, is_multiline, LineSegment};
use multiline_ocr::settings::load_settings;
use multiline_ocr::LineSegmenterConfig;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    width: u32,
    height: u32,
    multiline: bool,
    gate_ms: f64,
    detect_ms: f64,
    segments: Vec<LineSegment>,
}

fn main() {
    multiline_ocr::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage:");
        eprintln!("  line-bench <image.png> [--crops <dir>]");
        eprintln!("  line-bench --batch <directory>");
        std::process::exit(1);
    }

    let config = load_settings().segmenter;
    log::info!("[BENCH] Segmenter config: {:?}", config);

    let outcome = if args[1] == "--batch" {
        match args.get(2) {
            Some(dir) => run_batch(Path::new(dir), &config),
            None => Err("--batch requires a directory path".to_string()),
        }
    } else {
        let crops = flag_value(&args, "--crops").map(PathBuf::from);
        run_single(Path::new(&args[1]), &config, crops.as_deref())
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn ms_since(start: Instant) -> f64 {
    start.elapsed().as_micros() as f64 / 1000.0
}

fn analyse(image: &multiline_ocr::RasterImage, config: &LineSegmenterConfig) -> Report {
    let gate_start = Instant::now();
    let multiline = is_multiline(image, config);
    let gate_ms = ms_since(gate_start);

    let detect_start = Instant::now();
    let segments = detect_lines(image, config);
    let detect_ms = ms_since(detect_start);

    Report {
        width: image.width(),
        height: image.height(),
        multiline,
        gate_ms,
        detect_ms,
        segments,
    }
}

fn run_single(path: &Path, config: &LineSegmenterConfig, crops: Option<&Path>) -> Result<(), String> {
    let image = raster::open(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let report = analyse(&image, config);

    let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
    println!("{}", json);

    if let Some(dir) = crops {
        std::fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        let strips = extract_lines(&image, config);
        for (i, strip) in strips.iter().enumerate() {
            let png = strip.to_png_bytes().map_err(|e| format!("PNG encode failed: {}", e))?;
            let out = dir.join(format!("line-{:03}.png", i + 1));
            std::fs::write(&out, png).map_err(|e| format!("Failed to write {}: {}", out.display(), e))?;
        }
        eprintln!("[BENCH] Wrote {} strip(s) to {}", strips.len(), dir.display());
    }
    Ok(())
}

fn run_batch(dir: &Path, config: &LineSegmenterConfig) -> Result<(), String> {
    if !dir.is_dir() {
        return Err(format!("Not a directory: {}", dir.display()));
    }

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory: {}", e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext == "png" || ext == "jpg" || ext == "jpeg" || ext == "webp")
                .unwrap_or(false)
        })
        .collect();
    entries.sort();

    if entries.is_empty() {
        return Err(format!("No image files found in {}", dir.display()));
    }

    println!("filename,width,height,multiline,segments,gate_ms,detect_ms");

    let mut latencies: Vec<f64> = Vec::new();
    for path in &entries {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let image = match raster::open(path) {
            Ok(image) => image,
            Err(e) => {
                eprintln!("[BENCH] Skipping {}: {}", filename, e);
                continue;
            }
        };
        let report = analyse(&image, config);
        println!(
            "{},{},{},{},{},{:.2},{:.2}",
            filename,
            report.width,
            report.height,
            report.multiline,
            report.segments.len(),
            report.gate_ms,
            report.detect_ms
        );
        latencies.push(report.detect_ms);
        std::io::stdout().flush().ok();
    }

    eprintln!("\n--- Benchmark Summary ---");
    eprintln!("  Images processed: {}", latencies.len());
    if !latencies.is_empty() {
        print_latency_summary("Detect", &mut latencies, 50.0);
    }
    Ok(())
}

fn print_latency_summary(label: &str, latencies: &mut [f64], target_ms: f64) {
    latencies.sort_by(|a, b| a.total_cmp(b));
    let median = latencies[latencies.len() / 2];
    let p99_idx = ((latencies.len() as f64 * 0.99).ceil() as usize).min(latencies.len() - 1);
    let p99 = latencies[p99_idx];
    let avg: f64 = latencies.iter().sum::<f64>() / latencies.len() as f64;

    eprintln!("  [{}]", label);
    eprintln!("    Median: {:.1}ms", median);
    eprintln!("    Average: {:.1}ms", avg);
    eprintln!("    P99: {:.1}ms", p99);
    eprintln!(
        "    Target (< {:.0}ms): {}",
        target_ms,
        if median < target_ms { "PASS" } else { "FAIL" }
    );
}
