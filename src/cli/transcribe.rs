//! CLI transcription command implementation.

use crate::audio::{prepare_for_whisper, read_wav};
use crate::cli::args::{OutputFormat, TranscribeArgs};
use crate::config::{load_config, models_dir, Config};
use crate::models::{get_model_path, list_downloaded_models};
use crate::transcription::TranscriptionService;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// JSON output structure for transcription results.
#[derive(Serialize)]
struct TranscriptionOutput {
    version: String,
    input_file: String,
    duration_secs: f64,
    language: String,
    model: String,
    transcription: String,
}

/// Run the transcribe command.
pub fn run(args: TranscribeArgs) -> Result<()> {
    // 1. Load config (custom path or default)
    let config = load_config_cascade(&args)?;

    // 2. Resolve model path
    let model_path = resolve_model(&args, &config)?;

    // 3. Read WAV file
    eprintln!("Reading: {}", args.input.display());
    let audio = read_wav(&args.input)?;
    eprintln!(
        "  {} channels, {}Hz, {:.1}s",
        audio.channels, audio.sample_rate, audio.duration_secs
    );

    // 4. Prepare audio for Whisper
    let samples = prepare_for_whisper(&audio, args.channel, config.min_duration_secs)?;

    // 5. Load model and transcribe
    eprintln!("Loading model: {}", model_path.display());
    let service = TranscriptionService::with_model(&model_path.to_string_lossy())?;

    let language = args.language.as_deref().unwrap_or(&config.language);

    eprintln!("Transcribing (language: {})...", language);
    let text = service.transcribe(&samples, Some(language))?;

    // 6. Output result
    output_result(&text, &args, audio.duration_secs, language, &model_path)?;

    Ok(())
}

/// Load config with cascade: custom path -> default path -> defaults.
fn load_config_cascade(args: &TranscribeArgs) -> Result<Config> {
    if let Some(ref custom_path) = args.config {
        // Load from custom path
        let content = fs::read_to_string(custom_path)
            .with_context(|| format!("Failed to read config: {}", custom_path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config")
    } else {
        // Use default config or defaults
        Ok(load_config().unwrap_or_default())
    }
}

/// Resolve model path from CLI args or config.
fn resolve_model(args: &TranscribeArgs, config: &Config) -> Result<PathBuf> {
    if let Some(ref model_arg) = args.model {
        let model_path = Path::new(model_arg);

        // If it's an absolute path or relative path that exists, use it directly
        if model_path.is_absolute() && model_path.exists() {
            return Ok(model_path.to_path_buf());
        }

        // If it's a relative path that exists in current dir
        if model_path.exists() {
            return Ok(model_path.to_path_buf());
        }

        // Try as a filename in models directory
        let in_models_dir = get_model_path(model_arg);
        if in_models_dir.exists() {
            return Ok(in_models_dir);
        }

        bail!(
            "Model not found: {}. Tried: {}, {}",
            model_arg,
            model_path.display(),
            in_models_dir.display()
        );
    }

    // Use config default
    let model_path = get_model_path(&config.default_model);
    if model_path.exists() {
        return Ok(model_path);
    }

    // Try to find any downloaded model
    let downloaded = list_downloaded_models();
    if let Some(first) = downloaded.first() {
        let path = get_model_path(&first.filename);
        eprintln!(
            "Warning: configured model '{}' not found, using '{}'",
            config.default_model, first.filename
        );
        return Ok(path);
    }

    bail!(
        "No Whisper model found. Download one with `whisper-transcriber models download <name>` \
         or place a model in {}",
        models_dir().display()
    );
}

/// Output result in requested format.
fn output_result(
    text: &str,
    args: &TranscribeArgs,
    duration_secs: f64,
    language: &str,
    model_path: &Path,
) -> Result<()> {
    let output_text = match args.format {
        OutputFormat::Text => text.to_string(),
        OutputFormat::Json => {
            let output = TranscriptionOutput {
                version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: args.input.to_string_lossy().to_string(),
                duration_secs,
                language: language.to_string(),
                model: model_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                transcription: text.to_string(),
            };
            serde_json::to_string_pretty(&output).context("Failed to serialize JSON")?
        }
    };

    // Write to file or stdout
    if let Some(ref output_path) = args.output {
        fs::write(output_path, &output_text)
            .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
        eprintln!("Output written to: {}", output_path.display());
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", output_text)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::ChannelMode;

    fn args_with_config(config: Option<PathBuf>) -> TranscribeArgs {
        TranscribeArgs {
            input: PathBuf::from("test.wav"),
            output: None,
            config,
            model: None,
            language: None,
            channel: ChannelMode::Mix,
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_load_config_cascade_custom_path() {
        let dir = std::env::temp_dir().join("whisper_transcriber_cli_config");
        let _ = fs::create_dir_all(&dir);
        let path = dir.join("custom.toml");
        fs::write(
            &path,
            "default_model = \"ggml-tiny.bin\"\nlanguage = \"de\"\n",
        )
        .unwrap();

        let config = load_config_cascade(&args_with_config(Some(path.clone()))).unwrap();
        assert_eq!(config.default_model, "ggml-tiny.bin");
        assert_eq!(config.language, "de");
        assert_eq!(config.min_duration_secs, 0.5);

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }

    #[test]
    fn test_load_config_cascade_missing_custom_path_fails() {
        let args = args_with_config(Some(PathBuf::from("/nonexistent/custom.toml")));
        let result = load_config_cascade(&args);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_model_explicit_missing_path_fails() {
        let mut args = args_with_config(None);
        args.model = Some("/nonexistent/ggml-none.bin".to_string());
        let result = resolve_model(&args, &Config::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Model not found"));
    }
}
