use crate::config::models_dir;
use anyhow::{bail, Context, Result};
use futures_util::StreamExt;
use log::warn;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Validates that a model filename is safe (no path traversal).
///
/// Rejects filenames containing path separators or `..` sequences.
fn sanitize_model_filename(filename: &str) -> Result<()> {
    if filename.is_empty() {
        bail!("Model filename cannot be empty");
    }
    if filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.contains('\0')
    {
        bail!("Invalid model filename: {}", filename);
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub filename: String,
    pub display_name: String,
    pub size_bytes: u64,
    pub description: String,
    pub sha256: Option<String>,
}

fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let mut file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for verification: {}", path.display()))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).context("Failed to compute checksum")?;
    let hash = format!("{:x}", hasher.finalize());
    if hash != expected {
        bail!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            hash
        );
    }
    Ok(())
}

const HUGGINGFACE_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/";

pub fn get_available_models() -> Vec<ModelInfo> {
    vec![
        // Quantized models (recommended for faster performance)
        ModelInfo {
            filename: "ggml-tiny-q5_1.bin".to_string(),
            display_name: "Tiny Q5".to_string(),
            size_bytes: 32_152_673,
            description: "Fastest quantized, ~2x faster".to_string(),
            sha256: Some("818710568da3ca15689e31a743197b520007872ff9576237bda97bd1b469c3d7".to_string()),
        },
        ModelInfo {
            filename: "ggml-base-q5_1.bin".to_string(),
            display_name: "Base Q5 (Recommended)".to_string(),
            size_bytes: 59_707_625,
            description: "Fast and accurate, best balance".to_string(),
            sha256: Some("422f1ae452ade6f30a004d7e5c6a43195e4433bc370bf23fac9cc591f01a8898".to_string()),
        },
        ModelInfo {
            filename: "ggml-base-q8_0.bin".to_string(),
            display_name: "Base Q8".to_string(),
            size_bytes: 81_768_585,
            description: "Quantized, best quality among Q models".to_string(),
            sha256: Some("c577b9a86e7e048a0b7eada054f4dd79a56bbfa911fbdacf900ac5b567cbb7d9".to_string()),
        },
        ModelInfo {
            filename: "ggml-small-q5_1.bin".to_string(),
            display_name: "Small Q5".to_string(),
            size_bytes: 190_085_487,
            description: "Good quality, faster than full precision".to_string(),
            sha256: Some("ae85e4a935d7a567bd102fe55afc16bb595bdb618e11b2fc7591bc08120411bb".to_string()),
        },
        ModelInfo {
            filename: "ggml-small-q8_0.bin".to_string(),
            display_name: "Small Q8".to_string(),
            size_bytes: 264_464_607,
            description: "High quality among quantized models".to_string(),
            sha256: Some("49c8fb02b65e6049d5fa6c04f81f53b867b5ec9540406812c643f177317f779f".to_string()),
        },
        ModelInfo {
            filename: "ggml-medium-q5_0.bin".to_string(),
            display_name: "Medium Q5".to_string(),
            size_bytes: 539_212_467,
            description: "Large quantized, good quality".to_string(),
            sha256: Some("19fea4b380c3a618ec4723c3eef2eb785ffba0d0538cf43f8f235e7b3b34220f".to_string()),
        },
        // Full precision models
        ModelInfo {
            filename: "ggml-tiny.bin".to_string(),
            display_name: "Tiny".to_string(),
            size_bytes: 77_691_713,
            description: "Fastest, lowest accuracy".to_string(),
            sha256: Some("be07e048e1e599ad46341c8d2a135645097a538221678b7acdd1b1919c6e1b21".to_string()),
        },
        ModelInfo {
            filename: "ggml-base.bin".to_string(),
            display_name: "Base".to_string(),
            size_bytes: 147_951_465,
            description: "Balance of speed and accuracy".to_string(),
            sha256: Some("60ed5bc3dd14eea856493d334349b405782ddcaf0028d4b5df4088345fba2efe".to_string()),
        },
        ModelInfo {
            filename: "ggml-small.bin".to_string(),
            display_name: "Small".to_string(),
            size_bytes: 487_601_967,
            description: "Good accuracy".to_string(),
            sha256: Some("1be3a9b2063867b937e64e2ec7483364a79917e157fa98c5d94b5c1fffea987b".to_string()),
        },
        ModelInfo {
            filename: "ggml-medium.bin".to_string(),
            display_name: "Medium".to_string(),
            size_bytes: 1_533_763_059,
            description: "High accuracy".to_string(),
            sha256: Some("6c14d5adee5f86394037b4e4e8b59f1673b6cee10e3cf0b11bbdbee79c156208".to_string()),
        },
        ModelInfo {
            filename: "ggml-large-v3.bin".to_string(),
            display_name: "Large v3".to_string(),
            size_bytes: 3_095_033_483,
            description: "Highest accuracy".to_string(),
            sha256: Some("64d182b440b98d5203c4f9bd541544d84c605196c4f7b845dfa11fb23594d1e2".to_string()),
        },
    ]
}

pub fn list_downloaded_models() -> Vec<ModelInfo> {
    let dir = models_dir();
    let available = get_available_models();

    available
        .into_iter()
        .filter(|model| {
            let path = dir.join(&model.filename);
            path.exists()
        })
        .collect()
}

pub fn is_model_downloaded(filename: &str) -> bool {
    if sanitize_model_filename(filename).is_err() {
        return false;
    }
    let path = models_dir().join(filename);
    path.exists()
}

pub fn get_model_path(filename: &str) -> PathBuf {
    // Note: callers should validate before calling; this is a best-effort guard.
    // If the filename is invalid, we still return a path within models_dir
    // but the file won't exist, which is safe.
    models_dir().join(filename)
}

pub fn delete_model(filename: &str) -> Result<()> {
    sanitize_model_filename(filename)?;
    let path = models_dir().join(filename);

    if !path.exists() {
        return Err(anyhow::anyhow!("Model not found: {}", filename));
    }

    fs::remove_file(&path)
        .with_context(|| format!("Failed to delete model: {}", path.display()))?;

    Ok(())
}

/// Download a single file via HTTP with progress reporting, checksum
/// verification, and atomic rename from temp to final path.
async fn download_file(
    url: &str,
    dir: &Path,
    filename: &str,
    expected_sha256: Option<&str>,
    progress_callback: &(dyn Fn(u64, u64) + Send + Sync),
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let temp_path = dir.join(format!("{}.downloading", filename));
    let final_path = dir.join(filename);

    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to connect: {}", url))?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Download failed for {}: HTTP {}",
            filename,
            response.status()
        ));
    }

    let total_size = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let mut file = fs::File::create(&temp_path)
        .with_context(|| format!("Failed to create file: {}", temp_path.display()))?;

    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("Download stream error")?;
        std::io::Write::write_all(&mut file, &chunk).context("Failed to write data")?;

        downloaded += chunk.len() as u64;
        progress_callback(downloaded, total_size);
    }

    drop(file);

    if let Some(expected) = expected_sha256 {
        if let Err(e) = verify_checksum(&temp_path, expected) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
    }

    fs::rename(&temp_path, &final_path).with_context(|| {
        format!(
            "Failed to rename {} -> {}",
            temp_path.display(),
            final_path.display()
        )
    })?;

    Ok(final_path)
}

pub async fn download_model<F>(filename: &str, progress_callback: F) -> Result<()>
where
    F: Fn(u64, u64) + Send + Sync + 'static,
{
    sanitize_model_filename(filename)?;

    let expected_sha256 = get_available_models()
        .iter()
        .find(|m| m.filename == filename)
        .and_then(|m| m.sha256.clone());

    let url = format!("{}{}", HUGGINGFACE_BASE_URL, filename);

    if expected_sha256.is_none() {
        warn!("Checksum unknown for {}, skipping verification", filename);
    }

    download_file(
        &url,
        &models_dir(),
        filename,
        expected_sha256.as_deref(),
        &progress_callback,
    )
    .await?;

    Ok(())
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} B", bytes)
    }
}
