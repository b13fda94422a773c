use crate::error::{Result, SumsumError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Approximate size of the Q8_0 weight file, for the disk space check
const WEIGHTS_SIZE_MB: u64 = 3500;

/// Streaming downloader for model weights with progress tracking
pub struct WeightsDownloader {
    client: reqwest::Client,
    model_dir: PathBuf,
}

impl WeightsDownloader {
    /// Create new downloader, ensuring the model directory exists
    pub fn new(model_dir: &Path, timeout_secs: u64) -> Result<Self> {
        fs::create_dir_all(model_dir)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SumsumError::Download(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            model_dir: model_dir.to_path_buf(),
        })
    }

    /// Stream-download `url` to `dest`, writing through a `.part` file
    /// that is renamed into place only on success.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.check_disk_space(WEIGHTS_SIZE_MB)?;

        tracing::info!("Downloading model weights from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SumsumError::Download(format!("Failed to start download: {e}")))?;

        if !response.status().is_success() {
            return Err(SumsumError::Download(format!(
                "Server returned HTTP {} for {url}",
                response.status()
            )));
        }

        let progress = match response.content_length() {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
                    )
                    .map_err(|e| SumsumError::Download(e.to_string()))?
                    .progress_chars("#>-"),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        progress.set_message("Downloading");

        let tmp_path = part_path(dest);
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let data = chunk
                .map_err(|e| SumsumError::Download(format!("Download stream interrupted: {e}")))?;
            file.write_all(&data).await?;
            downloaded += data.len() as u64;
            progress.set_position(downloaded);
        }

        file.flush().await?;
        progress.finish_with_message("Downloaded");

        tokio::fs::rename(&tmp_path, dest).await?;

        tracing::info!(
            "Downloaded {} ({})",
            dest.display(),
            format_bytes(downloaded)
        );

        Ok(downloaded)
    }

    /// Check if enough disk space is available
    fn check_disk_space(&self, required_mb: u64) -> Result<()> {
        let stats = nix::sys::statvfs::statvfs(&self.model_dir)
            .map_err(|e| SumsumError::Download(format!("Failed to check disk space: {e}")))?;

        let available_bytes = stats.blocks_available() * stats.block_size();
        let required_bytes = required_mb * 1_024 * 1_024;

        // Add 100MB buffer for safety
        let required_with_buffer = required_bytes + (100 * 1_024 * 1_024);

        if available_bytes < required_with_buffer {
            let available_mb = available_bytes / (1_024 * 1_024);
            let required_mb_with_buffer = required_with_buffer / (1_024 * 1_024);

            return Err(SumsumError::Download(format!(
                "Not enough disk space: {required_mb_with_buffer} MB required, {available_mb} MB available"
            )));
        }

        Ok(())
    }
}

/// Temporary path used while a download is in flight
fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}

/// Format bytes as human-readable string
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
        assert_eq!(format_bytes(1_572_864), "1.50 MB");
        assert_eq!(format_bytes(1_073_741_824), "1.00 GB");
        assert_eq!(format_bytes(1_610_612_736), "1.50 GB");
    }

    #[test]
    fn test_part_path() {
        let dest = Path::new("/tmp/models/weights.gguf");
        assert_eq!(part_path(dest), Path::new("/tmp/models/weights.gguf.part"));
    }

    #[test]
    fn test_new_creates_model_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let model_dir = temp_dir.path().join("models");
        assert!(!model_dir.exists());

        let downloader = WeightsDownloader::new(&model_dir, 30);
        assert!(downloader.is_ok());
        assert!(model_dir.exists());
    }

    #[test]
    fn test_disk_space_check_passes_for_zero() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let downloader = WeightsDownloader::new(temp_dir.path(), 30).unwrap();
        // Zero required bytes only needs the 100MB buffer
        assert!(downloader.check_disk_space(0).is_ok());
    }
}
