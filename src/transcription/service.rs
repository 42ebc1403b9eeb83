//! Transcription service layer.
//!
//! Wraps the Whisper engine with model lifecycle and per-instance
//! in-flight guarding.

use parking_lot::Mutex;
use std::path::Path;

use crate::transcription::error::TranscriptionError;
use crate::transcription::whisper::WhisperEngine;

/// Transcription service owning at most one loaded model.
///
/// The service has two states: unloaded (created via `new`, or after a
/// failed construction path the caller handled) and ready (created via
/// `with_model` or after a successful `load_model`). `transcribe` is only
/// valid in the ready state and reports `NotLoaded` otherwise.
///
/// At most one `transcribe` call runs per instance at a time; an
/// overlapping call is rejected with `Busy`. Distinct instances hold
/// distinct model resources and are independent.
pub struct TranscriptionService {
    engine: Option<WhisperEngine>,
    in_flight: Mutex<()>,
}

impl TranscriptionService {
    /// Create a service without a loaded model.
    pub fn new() -> Self {
        Self {
            engine: None,
            in_flight: Mutex::new(()),
        }
    }

    /// Create a service with a model loaded from `model_path`.
    pub fn with_model(model_path: &str) -> Result<Self, TranscriptionError> {
        let engine = WhisperEngine::new(model_path)?;
        Ok(Self {
            engine: Some(engine),
            in_flight: Mutex::new(()),
        })
    }

    /// Check if a model is loaded and ready for transcription.
    pub fn is_loaded(&self) -> bool {
        self.engine.is_some()
    }

    /// Path of the loaded model, if any.
    pub fn model_path(&self) -> Option<String> {
        self.engine.as_ref().map(|e| e.model_path().to_string())
    }

    /// Transcribe a whole buffer of 16kHz mono samples, blocking until
    /// the engine produces a result.
    pub fn transcribe(
        &self,
        samples: &[f32],
        language: Option<&str>,
    ) -> Result<String, TranscriptionError> {
        let _guard = self
            .in_flight
            .try_lock()
            .ok_or(TranscriptionError::Busy)?;

        let engine = self.engine.as_ref().ok_or(TranscriptionError::NotLoaded)?;
        engine.transcribe(samples, language)
    }

    /// Load or replace the model. The previously held resource is
    /// released before this returns.
    pub fn load_model(&mut self, path: &Path) -> Result<(), TranscriptionError> {
        let engine = WhisperEngine::new(&path.to_string_lossy())?;
        self.engine = Some(engine);
        Ok(())
    }
}

impl Default for TranscriptionService {
    fn default() -> Self {
        Self::new()
    }
}

// === Trait Implementation ===

use crate::domain::traits::Transcription;

impl Transcription for TranscriptionService {
    fn transcribe(&self, samples: &[f32], language: &str) -> Result<String, TranscriptionError> {
        TranscriptionService::transcribe(self, samples, Some(language))
    }

    fn is_loaded(&self) -> bool {
        TranscriptionService::is_loaded(self)
    }

    fn model_name(&self) -> Option<String> {
        self.model_path()
    }

    fn load_model(&mut self, path: &Path) -> Result<(), TranscriptionError> {
        TranscriptionService::load_model(self, path)
    }
}
