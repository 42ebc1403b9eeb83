//! Core domain traits for dependency inversion.
//!
//! These traits define contracts between layers without depending on
//! concrete implementations. They enable:
//! - Testability via mock implementations
//! - Flexibility to swap implementations
//! - Clear API boundaries

use std::path::Path;

use crate::transcription::TranscriptionError;

/// Speech-to-text transcription abstraction.
///
/// Implementors convert a fully-buffered sequence of audio samples into
/// text in one blocking call. No partial results are emitted.
pub trait Transcription: Send + Sync {
    /// Transcribe audio samples to text.
    ///
    /// # Arguments
    /// * `samples` - Audio samples at 16kHz mono
    /// * `language` - Language code (e.g., "en", "uk", "auto")
    fn transcribe(&self, samples: &[f32], language: &str) -> Result<String, TranscriptionError>;

    /// Check if a model is loaded and ready for transcription.
    fn is_loaded(&self) -> bool;

    /// Get the name/path of the loaded model.
    fn model_name(&self) -> Option<String>;

    /// Load or replace the model from the given path.
    fn load_model(&mut self, path: &Path) -> Result<(), TranscriptionError>;
}
