//! YouTube audio download via the external yt-dlp binary.

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::{Error, Result};

/// A downloaded audio track.
#[derive(Debug, Clone)]
pub struct DownloadedAudio {
    /// Path of the extracted mp3.
    pub path: PathBuf,
    /// Video title reported by yt-dlp.
    pub title: String,
}

/// Wrapper around the external yt-dlp binary.
pub struct YtDlp {
    binary_path: PathBuf,
}

impl YtDlp {
    /// Creates a new wrapper with an explicit binary path.
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Finds yt-dlp in PATH.
    pub fn from_path() -> Result<Self> {
        which::which("yt-dlp")
            .map(Self::new)
            .map_err(|_| Error::ToolNotFound("yt-dlp"))
    }

    /// Downloads the best audio stream of a video and extracts it to mp3.
    ///
    /// `output_stem` is the target path without extension; the extracted
    /// file lands at `{output_stem}.mp3`. Accepts full YouTube URLs or bare
    /// video IDs. Returns the mp3 path and the video title.
    pub async fn download_audio(&self, url: &str, output_stem: &Path) -> Result<DownloadedAudio> {
        let template = format!("{}.%(ext)s", output_stem.display());

        tracing::debug!(url, template, "running yt-dlp");
        let output = Command::new(&self.binary_path)
            .arg("--no-simulate")
            .arg("--print")
            .arg("title")
            .arg("-f")
            .arg("bestaudio/best")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg("192K")
            .arg("-o")
            .arg(&template)
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Tool {
                tool: "yt-dlp",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let title = if title.is_empty() {
            "Unknown".to_string()
        } else {
            title
        };

        Ok(DownloadedAudio {
            path: output_stem.with_extension("mp3"),
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_fails_for_missing_binary() {
        assert!(which::which("nonexistent-yt-dlp-binary-xyz").is_err());
    }
}
