//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Whisper Transcriber - Offline speech-to-text transcription
#[derive(Parser)]
#[command(name = "whisper-transcriber")]
#[command(about = "Offline speech-to-text transcription using Whisper", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transcribe a WAV file to text
    Transcribe(TranscribeArgs),
    /// List, download, or delete Whisper models
    Models(ModelsArgs),
}

#[derive(Parser)]
pub struct TranscribeArgs {
    /// Path to WAV file to transcribe (16kHz mono expected)
    pub input: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (default: ~/.config/whisper-transcriber/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override model path or filename
    #[arg(short, long)]
    pub model: Option<String>,

    /// Override language (en, uk, auto, etc.)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Channel handling mode for stereo files
    #[arg(long, value_enum, default_value_t = ChannelMode::Mix)]
    pub channel: ChannelMode,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ChannelMode {
    /// Mix both channels to mono (default)
    #[default]
    Mix,
    /// Use left channel only
    Left,
    /// Use right channel only
    Right,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON output with metadata
    Json,
}

#[derive(Parser)]
pub struct ModelsArgs {
    #[command(subcommand)]
    pub action: Option<ModelsAction>,
}

#[derive(Subcommand)]
pub enum ModelsAction {
    /// Download a model from HuggingFace
    Download {
        /// Model filename (e.g. ggml-base.bin)
        name: String,
    },
    /// Delete a downloaded model
    Delete {
        /// Model filename (e.g. ggml-base.bin)
        name: String,
    },
}
