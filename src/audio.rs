//! WAV file reading and audio preparation utilities.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::cli::args::ChannelMode;

/// Sample rate the Whisper engine expects.
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Audio data read from a WAV file.
pub struct WavAudio {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1=mono, 2=stereo)
    pub channels: u16,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Samples per channel (interleaved for stereo)
    pub samples: Vec<f32>,
}

/// Read a WAV file and convert to f32 samples.
///
/// Supports 8/16/24/32-bit integer and 32-bit float formats.
pub fn read_wav(path: &Path) -> Result<WavAudio> {
    let reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

    let spec = reader.spec();
    let sample_rate = spec.sample_rate;
    let channels = spec.channels;
    let bits_per_sample = spec.bits_per_sample;
    let sample_format = spec.sample_format;

    let samples: Vec<f32> = match sample_format {
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_value))
                .collect::<Result<Vec<_>, _>>()
                .context("Failed to read WAV samples")?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read WAV samples")?,
    };

    let total_samples = samples.len() / channels as usize;
    let duration_secs = total_samples as f64 / sample_rate as f64;

    Ok(WavAudio {
        sample_rate,
        channels,
        duration_secs,
        samples,
    })
}

/// Extract a single channel from interleaved stereo samples.
fn extract_channel(samples: &[f32], channel_index: usize, num_channels: usize) -> Vec<f32> {
    samples
        .iter()
        .skip(channel_index)
        .step_by(num_channels)
        .copied()
        .collect()
}

/// Convert stereo to mono by averaging channels.
fn to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels == 1 {
        return samples.to_vec();
    }

    let num_channels = channels as usize;
    let num_frames = samples.len() / num_channels;
    let mut mono = Vec::with_capacity(num_frames);

    for i in 0..num_frames {
        let mut sum = 0.0;
        for ch in 0..num_channels {
            sum += samples[i * num_channels + ch];
        }
        mono.push(sum / num_channels as f32);
    }

    mono
}

/// Prepare audio for Whisper transcription.
///
/// Handles channel selection and input validation. The engine expects
/// 16kHz mono; files at other rates are rejected rather than resampled,
/// and recordings shorter than `min_duration_secs` are rejected before
/// the model is invoked.
pub fn prepare_for_whisper(
    audio: &WavAudio,
    channel_mode: ChannelMode,
    min_duration_secs: f64,
) -> Result<Vec<f32>> {
    if audio.sample_rate != WHISPER_SAMPLE_RATE {
        bail!(
            "Input is {}Hz; Whisper requires {}Hz mono. Resample the file before transcribing.",
            audio.sample_rate,
            WHISPER_SAMPLE_RATE
        );
    }

    if audio.duration_secs < min_duration_secs {
        bail!(
            "Recording too short ({:.2}s); minimum is {:.1}s",
            audio.duration_secs,
            min_duration_secs
        );
    }

    let is_stereo = audio.channels == 2;

    let samples = match (channel_mode, is_stereo) {
        (ChannelMode::Mix, _) => to_mono(&audio.samples, audio.channels),
        (ChannelMode::Left, true) => extract_channel(&audio.samples, 0, 2),
        (ChannelMode::Right, true) => extract_channel(&audio.samples, 1, 2),
        // Mono file with a channel-specific mode - just use the single channel
        (ChannelMode::Left, false) | (ChannelMode::Right, false) => audio.samples.clone(),
    };

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav(sample_rate: u32, channels: u16, samples: Vec<f32>) -> WavAudio {
        let total = samples.len() / channels as usize;
        WavAudio {
            sample_rate,
            channels,
            duration_secs: total as f64 / sample_rate as f64,
            samples,
        }
    }

    #[test]
    fn test_extract_channel_left() {
        let stereo = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let left = extract_channel(&stereo, 0, 2);
        assert_eq!(left, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_extract_channel_right() {
        let stereo = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let right = extract_channel(&stereo, 1, 2);
        assert_eq!(right, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_to_mono_stereo() {
        let stereo = vec![1.0, 2.0, 3.0, 4.0];
        let mono = to_mono(&stereo, 2);
        assert_eq!(mono, vec![1.5, 3.5]);
    }

    #[test]
    fn test_to_mono_already_mono() {
        let mono = vec![1.0, 2.0, 3.0];
        let result = to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn test_prepare_rejects_wrong_sample_rate() {
        let audio = wav(44_100, 1, vec![0.0; 44_100]);
        let result = prepare_for_whisper(&audio, ChannelMode::Mix, 0.5);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("44100Hz"));
    }

    #[test]
    fn test_prepare_rejects_too_short_recording() {
        // 0.25s at 16kHz
        let audio = wav(16_000, 1, vec![0.0; 4_000]);
        let result = prepare_for_whisper(&audio, ChannelMode::Mix, 0.5);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_prepare_mixes_stereo_to_mono() {
        let mut samples = Vec::new();
        for _ in 0..16_000 {
            samples.push(0.2);
            samples.push(0.4);
        }
        let audio = wav(16_000, 2, samples);
        let prepared = prepare_for_whisper(&audio, ChannelMode::Mix, 0.5).unwrap();
        assert_eq!(prepared.len(), 16_000);
        assert!((prepared[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_prepare_left_channel_only() {
        let mut samples = Vec::new();
        for _ in 0..16_000 {
            samples.push(1.0);
            samples.push(-1.0);
        }
        let audio = wav(16_000, 2, samples);
        let prepared = prepare_for_whisper(&audio, ChannelMode::Left, 0.5).unwrap();
        assert_eq!(prepared.len(), 16_000);
        assert_eq!(prepared[0], 1.0);
    }

    #[test]
    fn test_prepare_mono_passthrough() {
        let audio = wav(16_000, 1, vec![0.5; 16_000]);
        let prepared = prepare_for_whisper(&audio, ChannelMode::Mix, 0.5).unwrap();
        assert_eq!(prepared, audio.samples);
    }

    #[test]
    fn test_read_wav_missing_file() {
        let result = read_wav(Path::new("/nonexistent/input.wav"));
        assert!(result.is_err());
    }
}
