//! CLI mode for whisper-transcriber.
//!
//! Provides command-line transcription of WAV files and model management.

pub mod args;
pub mod models;
pub mod transcribe;

pub use args::Cli;
pub use args::Commands;
