//! End-to-end tests for the multiline pipeline with scripted recognizers.
//!
//! The recognizers here stand in for real backends: they answer from a
//! script in call order and record the strips they were given.

use multiline_ocr::ocr::TimeoutRecognizer;
use multiline_ocr::{process, BoxError, OcrError, ProcessOptions, RasterImage, Recognizer};
use std::cell::RefCell;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
#[error("engine down: {0}")]
struct EngineDown(&'static str);

/// Answers from `script` in call order; `Err` entries fail that call.
struct ScriptedRecognizer {
    script: Vec<Result<&'static str, EngineDown>>,
    seen: RefCell<Vec<(u32, u32)>>,
}

impl ScriptedRecognizer {
    fn new(script: Vec<Result<&'static str, EngineDown>>) -> Self {
        Self {
            script,
            seen: RefCell::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Recognizer for ScriptedRecognizer {
    async fn recognize(&self, image: &RasterImage) -> Result<String, BoxError> {
        let call = self.calls();
        self.seen.borrow_mut().push((image.width(), image.height()));
        tokio::task::yield_now().await;
        match self.script.get(call) {
            Some(Ok(text)) => Ok(text.to_string()),
            Some(Err(e)) => Err(Box::new(EngineDown(e.0))),
            None => Err("script exhausted".into()),
        }
    }
}

fn three_line_page() -> RasterImage {
    let (width, height) = (200u32, 150u32);
    let bands = [(20u32, 40u32), (70, 90), (120, 135)];
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let ink = bands.iter().any(|&(t, b)| (t..=b).contains(&y));
        let px = if ink { [0, 0, 0, 255] } else { [255, 255, 255, 255] };
        for _ in 0..width {
            pixels.extend_from_slice(&px);
        }
    }
    RasterImage::new(width, height, pixels)
}

#[tokio::test]
async fn lines_are_joined_in_order_and_empty_lines_dropped() {
    let recognizer = ScriptedRecognizer::new(vec![Ok("Line 1"), Ok(""), Ok("Line 3")]);
    let text = process(&three_line_page(), &recognizer, &ProcessOptions::default())
        .await
        .unwrap();

    assert_eq!(text, "Line 1\nLine 3");
    // top-to-bottom: padded strip heights 29, 29, 24
    assert_eq!(
        *recognizer.seen.borrow(),
        vec![(200, 29), (200, 29), (200, 24)]
    );
}

#[tokio::test]
async fn each_line_is_trimmed_before_joining() {
    let recognizer = ScriptedRecognizer::new(vec![Ok("  first \n"), Ok(" \t "), Ok("\tthird")]);
    let text = process(&three_line_page(), &recognizer, &ProcessOptions::default())
        .await
        .unwrap();
    assert_eq!(text, "first\nthird");
}

#[tokio::test]
async fn failure_on_second_line_aborts_the_document() {
    let recognizer = ScriptedRecognizer::new(vec![
        Ok("Line 1"),
        Err(EngineDown("worker crashed")),
        Ok("Line 3"),
    ]);
    let err = process(&three_line_page(), &recognizer, &ProcessOptions::default())
        .await
        .unwrap_err();

    match &err {
        OcrError::RecognitionFailed { line, total, .. } => {
            assert_eq!(*line, 2);
            assert_eq!(*total, 3);
        }
        other => panic!("expected RecognitionFailed, got {:?}", other),
    }
    let source = err.recognition_source().unwrap();
    assert_eq!(
        source.downcast_ref::<EngineDown>(),
        Some(&EngineDown("worker crashed"))
    );
    // the third strip is never attempted
    assert_eq!(recognizer.calls(), 2);
}

#[tokio::test]
async fn multiline_disabled_sends_the_whole_page_once() {
    let recognizer = ScriptedRecognizer::new(vec![Ok("  Line 1\nLine 2\nLine 3  ")]);
    let text = process(&three_line_page(), &recognizer, &ProcessOptions::single_shot())
        .await
        .unwrap();
    assert_eq!(text, "Line 1\nLine 2\nLine 3");
    assert_eq!(*recognizer.seen.borrow(), vec![(200, 150)]);
}

#[tokio::test]
async fn panoramic_strip_is_not_segmented() {
    let recognizer = ScriptedRecognizer::new(vec![Ok("one long line")]);
    let strip = RasterImage::filled(1000, 40, [0, 0, 0, 255]);
    let text = process(&strip, &recognizer, &ProcessOptions::default())
        .await
        .unwrap();
    assert_eq!(text, "one long line");
    assert_eq!(recognizer.calls(), 1);
}

#[tokio::test]
async fn single_shot_failure_is_propagated() {
    let recognizer = ScriptedRecognizer::new(vec![Err(EngineDown("no model"))]);
    let err = process(&three_line_page(), &recognizer, &ProcessOptions::single_shot())
        .await
        .unwrap_err();
    assert_eq!(err.recognition_source().unwrap().to_string(), "engine down: no model");
}

#[tokio::test]
async fn zero_height_image_is_rejected_before_recognition() {
    let recognizer = ScriptedRecognizer::new(vec![Ok("unused")]);
    let err = process(&RasterImage::new(10, 0, Vec::new()), &recognizer, &ProcessOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, OcrError::InvalidInput(_)));
    assert_eq!(recognizer.calls(), 0);
}

struct Stalled;

impl Recognizer for Stalled {
    async fn recognize(&self, _image: &RasterImage) -> Result<String, BoxError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

#[tokio::test(start_paused = true)]
async fn caller_imposed_timeout_fails_the_document() {
    let recognizer = TimeoutRecognizer::new(Stalled, Duration::from_millis(500));
    let err = process(&three_line_page(), &recognizer, &ProcessOptions::default())
        .await
        .unwrap_err();
    match err {
        OcrError::RecognitionFailed { line, source, .. } => {
            assert_eq!(line, 1);
            assert!(source.to_string().contains("timed out"));
        }
        other => panic!("expected RecognitionFailed, got {:?}", other),
    }
}
