//! Drives a [`SessionTracker`] over a recording and scores the result.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use formcheck_core::exercise::find_exercise;
use formcheck_core::summary::ExerciseSummary;
use formcheck_core::{ExerciseSession, FormAnalyzer, SessionTracker};

use crate::recording::{read_recording, RecordedFrame, Recording};

/// Outcome of replaying one recording.
#[derive(Debug)]
pub struct ReplayReport {
    pub session: ExerciseSession,
    pub summary: ExerciseSummary,
    pub frames_analyzed: usize,
    pub frames_paused: usize,
    pub frames_without_pose: usize,
    pub skipped_lines: usize,
}

/// Feed `frames` through a new session for `exercise_id`.
///
/// The session starts at the first frame's timestamp and ends at the
/// last one. An empty recording yields an empty zero-length session.
pub fn replay_frames(
    analyzer: FormAnalyzer,
    exercise_id: &str,
    frames: &[RecordedFrame],
) -> anyhow::Result<(ExerciseSession, ReplayCounts)> {
    let started = frames.first().map_or(0, |f| f.timestamp_ms);
    let ended = frames.last().map_or(started, |f| f.timestamp_ms);

    let mut tracker = SessionTracker::start(analyzer, exercise_id, started);
    let mut counts = ReplayCounts::default();

    for frame in frames {
        if frame.paused != tracker.is_paused() {
            if frame.paused {
                tracker.pause();
            } else {
                tracker.resume();
            }
        }

        match tracker.process_frame(&frame.landmarks, frame.timestamp_ms) {
            Some(analysis) if analysis.pose_detected => counts.analyzed += 1,
            Some(_) => counts.without_pose += 1,
            None => counts.paused += 1,
        }

        if frame.complete_set {
            tracker.complete_set();
        }
    }

    let session = tracker
        .finish(ended)
        .context("recording timestamps are out of order")?;
    Ok((session, counts))
}

/// Per-frame tallies from [`replay_frames`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayCounts {
    pub analyzed: usize,
    pub paused: usize,
    pub without_pose: usize,
}

/// Replay an already-read recording and build the report.
pub fn replay(
    analyzer: FormAnalyzer,
    exercise_id: &str,
    recording: Recording,
) -> anyhow::Result<ReplayReport> {
    if find_exercise(exercise_id).is_none() {
        tracing::warn!(exercise_id, "Exercise not in catalog, using generic posture checks");
    }

    let (session, counts) = replay_frames(analyzer, exercise_id, &recording.frames)?;
    let summary = session.summary();

    tracing::info!(
        exercise_id,
        frames = recording.frames.len(),
        analyzed = counts.analyzed,
        skipped_lines = recording.skipped_lines,
        total_reps = summary.total_reps,
        form_score = summary.form_score,
        "Replay complete"
    );

    Ok(ReplayReport {
        session,
        summary,
        frames_analyzed: counts.analyzed,
        frames_paused: counts.paused,
        frames_without_pose: counts.without_pose,
        skipped_lines: recording.skipped_lines,
    })
}

/// Read `path` and replay it.
pub fn replay_file(
    analyzer: FormAnalyzer,
    exercise_id: &str,
    path: &Path,
) -> anyhow::Result<ReplayReport> {
    let file = File::open(path)
        .with_context(|| format!("failed to open recording {}", path.display()))?;
    let recording = read_recording(BufReader::new(file))
        .with_context(|| format!("failed to read recording {}", path.display()))?;
    replay(analyzer, exercise_id, recording)
}
