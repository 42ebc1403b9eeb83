//! CLI model management: list, download, and delete Whisper models.

use crate::cli::args::{ModelsAction, ModelsArgs};
use crate::config::models_dir;
use crate::models::{
    delete_model, download_model, format_size, get_available_models, is_model_downloaded,
    list_downloaded_models,
};
use anyhow::{bail, Context, Result};

/// Run the models command.
pub fn run(args: ModelsArgs) -> Result<()> {
    match args.action {
        None => list(),
        Some(ModelsAction::Download { name }) => download(&name),
        Some(ModelsAction::Delete { name }) => delete(&name),
    }
}

/// List available models with download status.
fn list() -> Result<()> {
    let available = get_available_models();
    let downloaded = list_downloaded_models();
    let downloaded_names: std::collections::HashSet<_> =
        downloaded.iter().map(|m| &m.filename).collect();

    println!("Available Whisper models:");
    println!();

    for model in &available {
        let status = if downloaded_names.contains(&model.filename) {
            "[downloaded]"
        } else {
            ""
        };

        println!(
            "  {:30} {:>10}  {}",
            model.filename,
            format_size(model.size_bytes),
            status
        );
    }

    println!();
    println!("Models directory: {}", models_dir().display());
    println!();
    println!("Downloaded models: {}", downloaded.len());

    if downloaded.is_empty() {
        println!();
        println!("No models downloaded. Use `whisper-transcriber models download <name>`,");
        println!("or manually place .bin files in the models directory.");
    }

    Ok(())
}

/// Download a model from HuggingFace, with progress on stderr.
fn download(name: &str) -> Result<()> {
    if is_model_downloaded(name) {
        eprintln!("Model already downloaded: {}", name);
        return Ok(());
    }

    if !get_available_models().iter().any(|m| m.filename == name) {
        bail!(
            "Unknown model: {}. Run `whisper-transcriber models` to see available models.",
            name
        );
    }

    eprintln!("Downloading: {}", name);

    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(download_model(name, |downloaded, total| {
        if total > 0 {
            eprint!(
                "\r  {} / {} ({:.0}%)",
                format_size(downloaded),
                format_size(total),
                downloaded as f64 / total as f64 * 100.0
            );
        } else {
            eprint!("\r  {} downloaded", format_size(downloaded));
        }
    }))?;
    eprintln!();

    eprintln!("Saved to: {}", models_dir().join(name).display());
    Ok(())
}

/// Delete a downloaded model.
fn delete(name: &str) -> Result<()> {
    delete_model(name)?;
    eprintln!("Deleted: {}", name);
    Ok(())
}
