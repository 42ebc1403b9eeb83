use log::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::transcription::error::TranscriptionError;

/// Owning handle around a loaded ggml Whisper model.
///
/// The wrapped context is the model resource: acquired in `new`, held
/// exclusively by this handle, released exactly once when the handle is
/// dropped. Construction either yields a fully usable engine or fails;
/// no partially-initialized engine is observable.
///
/// Input contract: 16kHz mono f32 samples, amplitudes in [-1.0, 1.0].
/// The engine does not resample; callers conform the input.
pub struct WhisperEngine {
    ctx: WhisperContext,
    model_path: String,
}

impl WhisperEngine {
    /// Load a ggml model from `model_path`.
    pub fn new(model_path: &str) -> Result<Self, TranscriptionError> {
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| TranscriptionError::ModelLoad {
                path: model_path.to_string(),
                reason: e.to_string(),
            })?;

        info!("Whisper model prepared: {}", model_path);

        Ok(Self {
            ctx,
            model_path: model_path.to_string(),
        })
    }

    /// Path the model was loaded from.
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// Transcribe a whole buffer of samples, blocking until complete.
    ///
    /// Decoding state is created per call; the model resource itself is
    /// unchanged by a call, so identical input yields identical text.
    /// Returns the concatenated segment text, trimmed. Empty text is a
    /// valid result when the engine detects no speech.
    pub fn transcribe(
        &self,
        samples: &[f32],
        language: Option<&str>,
    ) -> Result<String, TranscriptionError> {
        if samples.is_empty() {
            return Err(TranscriptionError::EmptyAudio);
        }

        debug!("Starting transcription of {} samples", samples.len());

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        if let Some(lang) = language {
            params.set_language(Some(lang));
        }

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(false);

        let mut state = self.ctx.create_state().map_err(engine_error)?;
        state.full(params, samples).map_err(engine_error)?;

        let num_segments = state.full_n_segments().map_err(engine_error)?;
        let mut text = String::new();

        for i in 0..num_segments {
            if let Ok(segment) = state.full_get_segment_text(i) {
                text.push_str(&segment);
                text.push(' ');
            }
        }

        let text = text.trim().to_string();
        debug!("Transcription completed, {} characters", text.len());

        Ok(text)
    }
}

fn engine_error(e: whisper_rs::WhisperError) -> TranscriptionError {
    TranscriptionError::Engine(e.to_string())
}
