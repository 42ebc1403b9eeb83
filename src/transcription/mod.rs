//! Speech-to-text transcription.
//!
//! `WhisperEngine` is the owning handle around a loaded model;
//! `TranscriptionService` wraps it with lifecycle and in-flight guarding.

pub mod error;
pub mod service;
pub mod whisper;

pub use error::TranscriptionError;
pub use service::TranscriptionService;
pub use whisper::WhisperEngine;
