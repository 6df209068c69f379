//! `formcheck-replay` library crate.
//!
//! Re-exports the recording format and replay driver for integration
//! testing. The binary entrypoint lives in `main.rs`.

pub mod recording;
pub mod runner;
