//! JSON-lines landmark recordings.
//!
//! One frame per line:
//!
//! ```json
//! {"timestamp_ms": 1200, "landmarks": [{"x": 0.5, "y": 0.4, "visibility": 0.9}], "complete_set": true}
//! ```
//!
//! `complete_set` closes the current set after the frame is analyzed;
//! `paused` marks frames captured while the session was paused.

use std::io::BufRead;

use formcheck_core::types::EpochMillis;
use formcheck_core::Landmark;
use serde::{Deserialize, Serialize};

/// A single recorded camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: EpochMillis,
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub complete_set: bool,
    #[serde(default)]
    pub paused: bool,
}

/// Parse one line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<RecordedFrame>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Frames read from a recording plus the number of lines that were dropped.
#[derive(Debug, Default)]
pub struct Recording {
    pub frames: Vec<RecordedFrame>,
    pub skipped_lines: usize,
}

/// Read every frame from `reader`.
///
/// Malformed lines are logged and skipped; I/O failures abort the read.
pub fn read_recording<R: BufRead>(reader: R) -> std::io::Result<Recording> {
    let mut recording = Recording::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(Some(frame)) => recording.frames.push(frame),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "Skipping malformed frame");
                recording.skipped_lines += 1;
            }
        }
    }

    Ok(recording)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
