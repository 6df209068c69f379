//! `formcheck-replay` -- offline form analysis of recorded landmark streams.
//!
//! Reads a JSON-lines recording (see [`formcheck_replay::recording`]),
//! runs it through a form-checking session and prints the scored summary
//! as JSON on stdout.
//!
//! # Usage
//!
//! `formcheck-replay [RECORDING] [EXERCISE_ID]`
//!
//! # Environment variables
//!
//! | Variable                     | Required | Default | Description                              |
//! |------------------------------|----------|---------|------------------------------------------|
//! | `REPLAY_INPUT`               | yes*     | --      | Recording path (*unless given as arg 1)  |
//! | `EXERCISE_ID`                | no       | `squats`| Exercise to analyze (overridden by arg 2)|
//! | `FORMCHECK_MIN_VISIBILITY`   | no       | `0.5`   | Joint visibility floor                   |
//! | `FORMCHECK_SQUAT_MIN_REP_MS` | no       | `500`   | Squat rep debounce                       |
//! | `FORMCHECK_CURL_MIN_REP_MS`  | no       | `300`   | Curl rep debounce                        |
//! | `FORMCHECK_CRUNCH_MIN_REP_MS`| no       | `400`   | Crunch rep debounce                      |

use std::path::PathBuf;

use anyhow::Context;
use formcheck_core::FormAnalyzer;
use formcheck_replay::runner;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exercise analyzed when none is given.
const DEFAULT_EXERCISE_ID: &str = "squats";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the summary.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formcheck_replay=info,formcheck_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);

    let input: PathBuf = args
        .next()
        .or_else(|| std::env::var("REPLAY_INPUT").ok())
        .context("recording path required: pass it as the first argument or set REPLAY_INPUT")?
        .into();

    let exercise_id = args
        .next()
        .or_else(|| std::env::var("EXERCISE_ID").ok())
        .unwrap_or_else(|| DEFAULT_EXERCISE_ID.to_string());

    let analyzer = FormAnalyzer::from_env().context("invalid analyzer configuration")?;

    tracing::info!(
        input = %input.display(),
        exercise_id = %exercise_id,
        min_visibility = analyzer.config().min_visibility,
        "Starting formcheck-replay",
    );

    let report = runner::replay_file(analyzer, &exercise_id, &input)?;

    let output = serde_json::to_string_pretty(&report.summary)?;
    println!("{output}");

    Ok(())
}
