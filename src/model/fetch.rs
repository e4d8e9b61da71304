//! Model download logic.

use crate::constants::download::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Build the HTTP client used for model downloads.
pub fn download_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| Error::Internal {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Download a file with progress bar.
pub async fn download_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    if !response.status().is_success() {
        return Err(Error::DownloadFailed {
            url: url.to_string(),
            source: format!("HTTP {}", response.status()).into(),
        });
    }

    let total_size = response.content_length().unwrap_or(0);

    // Create progress bar
    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{bar:40.cyan/blue} {percent}% ({bytes}/{total_bytes})")
            .map_err(|e| Error::Internal {
                message: format!("Failed to create progress bar: {e}"),
            })?
            .progress_chars("█▓▒░ "),
    );
    // Use to_string_lossy() to handle non-UTF-8 filenames gracefully
    pb.set_message(format!(
        "Downloading {}...",
        dest.file_name().map_or_else(
            || std::borrow::Cow::Borrowed("file"),
            |n| n.to_string_lossy()
        )
    ));

    // Stream download
    let mut file = File::create(dest).await.map_err(Error::Io)?;
    let mut stream = response.bytes_stream();
    let mut downloaded = 0_u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::DownloadFailed {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        file.write_all(&chunk).await.map_err(Error::Io)?;

        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush().await.map_err(Error::Io)?;
    pb.finish_with_message("Download complete");

    Ok(())
}

/// Verify a file against an expected SHA-256 digest (lowercase hex).
pub fn verify_sha256(path: &Path, expected: &str) -> Result<()> {
    let contents = std::fs::read(path)?;
    let digest = Sha256::digest(&contents);
    let actual: String = digest.iter().map(|b| format!("{b:02x}")).collect();

    if actual.eq_ignore_ascii_case(expected) {
        info!("Checksum verified for {}", path.display());
        Ok(())
    } else {
        Err(Error::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: expected.to_lowercase(),
            actual,
        })
    }
}
