use thiserror::Error;

/// Failures surfaced by model loading and transcription.
///
/// Every failure is an explicit `Err` value; the service never panics and
/// never retries on the caller's behalf.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The model path did not yield a usable model (missing file,
    /// unsupported format, corrupt data, or allocation failure).
    #[error("failed to load Whisper model from {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    /// Transcribe was called on a service with no loaded model.
    #[error("no Whisper model loaded")]
    NotLoaded,

    /// Another transcription is already in flight on this instance.
    #[error("transcription already in progress")]
    Busy,

    /// The sample buffer was empty.
    #[error("audio buffer is empty")]
    EmptyAudio,

    /// The engine failed while processing the input.
    #[error("transcription failed: {0}")]
    Engine(String),
}
