//! Mock implementations for unit testing.
//!
//! These mocks implement the `Transcription` trait to enable testing
//! without real Whisper models.

use crate::domain::traits::Transcription;
use crate::transcription::TranscriptionError;
use std::path::Path;
use std::sync::Mutex;

/// Mock transcription service for testing.
///
/// Returns predefined text instead of actually transcribing, while
/// honoring the same contract as the real service: a mock without a
/// model rejects calls with `NotLoaded`, and empty input is rejected
/// with `EmptyAudio`.
pub struct MockTranscription {
    result: Mutex<String>,
    is_loaded: bool,
    model_name: Option<String>,
}

impl MockTranscription {
    /// Create a mock that returns the given text.
    pub fn returning(text: &str) -> Self {
        Self {
            result: Mutex::new(text.to_string()),
            is_loaded: true,
            model_name: Some("mock-model".to_string()),
        }
    }

    /// Create an unloaded mock (simulates no model loaded).
    pub fn unloaded() -> Self {
        Self {
            result: Mutex::new(String::new()),
            is_loaded: false,
            model_name: None,
        }
    }

    /// Set the text to return on next transcribe().
    pub fn set_result(&self, text: &str) {
        *self.result.lock().unwrap() = text.to_string();
    }
}

impl Transcription for MockTranscription {
    fn transcribe(&self, samples: &[f32], _language: &str) -> Result<String, TranscriptionError> {
        if !self.is_loaded {
            return Err(TranscriptionError::NotLoaded);
        }
        if samples.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }
        Ok(self.result.lock().unwrap().clone())
    }

    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn model_name(&self) -> Option<String> {
        self.model_name.clone()
    }

    fn load_model(&mut self, path: &Path) -> Result<(), TranscriptionError> {
        self.is_loaded = true;
        self.model_name = Some(path.to_string_lossy().to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transcription_returns_text() {
        let transcriber = MockTranscription::returning("hello world");
        let result = transcriber.transcribe(&[0.0; 16000], "en").unwrap();
        assert_eq!(result, "hello world");
    }

    #[test]
    fn test_mock_transcription_is_loaded() {
        let loaded = MockTranscription::returning("test");
        assert!(loaded.is_loaded());
        assert!(loaded.model_name().is_some());

        let unloaded = MockTranscription::unloaded();
        assert!(!unloaded.is_loaded());
        assert!(unloaded.model_name().is_none());
    }

    #[test]
    fn test_mock_transcription_unloaded_fails() {
        let transcriber = MockTranscription::unloaded();
        let result = transcriber.transcribe(&[0.0; 16000], "en");
        assert!(matches!(result, Err(TranscriptionError::NotLoaded)));
    }

    #[test]
    fn test_mock_transcription_empty_audio_fails() {
        let transcriber = MockTranscription::returning("text");
        let result = transcriber.transcribe(&[], "en");
        assert!(matches!(result, Err(TranscriptionError::EmptyAudio)));
    }

    #[test]
    fn test_mock_transcription_same_input_same_text() {
        let transcriber = MockTranscription::returning("stable output");
        let samples = vec![0.1; 16000];
        let first = transcriber.transcribe(&samples, "en").unwrap();
        let second = transcriber.transcribe(&samples, "en").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_mock_transcription_set_result() {
        let transcriber = MockTranscription::returning("initial");
        assert_eq!(
            transcriber.transcribe(&[0.0; 100], "en").unwrap(),
            "initial"
        );

        transcriber.set_result("updated");
        assert_eq!(
            transcriber.transcribe(&[0.0; 100], "en").unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_mock_load_model_sets_name() {
        let mut transcriber = MockTranscription::unloaded();
        transcriber
            .load_model(Path::new("/models/ggml-base.bin"))
            .unwrap();
        assert!(transcriber.is_loaded());
        assert_eq!(
            transcriber.model_name(),
            Some("/models/ggml-base.bin".to_string())
        );
    }

    // === Trait Object (Box<dyn>) Tests ===

    #[test]
    fn test_transcription_as_trait_object() {
        let transcriber: Box<dyn Transcription> =
            Box::new(MockTranscription::returning("test output"));
        assert!(transcriber.is_loaded());
        assert_eq!(transcriber.model_name(), Some("mock-model".to_string()));
        let text = transcriber.transcribe(&[0.0; 16000], "uk").unwrap();
        assert_eq!(text, "test output");
    }

    #[test]
    fn test_transcription_unloaded_as_trait_object() {
        let transcriber: Box<dyn Transcription> = Box::new(MockTranscription::unloaded());
        assert!(!transcriber.is_loaded());
        assert!(transcriber.transcribe(&[0.0; 100], "en").is_err());
    }
}
