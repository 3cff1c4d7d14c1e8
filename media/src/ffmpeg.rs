//! Audio editing via the external ffmpeg and ffprobe binaries.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::error::{Error, Result};

/// Wrapper around the external ffmpeg and ffprobe binaries.
pub struct Ffmpeg {
    ffmpeg_path: PathBuf,
    ffprobe_path: PathBuf,
}

impl Ffmpeg {
    /// Creates a new wrapper with explicit binary paths.
    pub fn new(ffmpeg_path: PathBuf, ffprobe_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }

    /// Finds ffmpeg and ffprobe in PATH. Both are required.
    pub fn from_path() -> Result<Self> {
        let ffmpeg = which::which("ffmpeg").map_err(|_| Error::ToolNotFound("ffmpeg"))?;
        let ffprobe = which::which("ffprobe").map_err(|_| Error::ToolNotFound("ffprobe"))?;
        Ok(Self::new(ffmpeg, ffprobe))
    }

    /// Returns the duration of an audio file in seconds.
    pub async fn probe_duration(&self, input: &Path) -> Result<f64> {
        let output = Command::new(&self.ffprobe_path)
            .arg("-v")
            .arg("error")
            .arg("-show_entries")
            .arg("format=duration")
            .arg("-of")
            .arg("default=noprint_wrappers=1:nokey=1")
            .arg(input)
            .output()
            .await?;

        if !output.status.success() {
            return Err(Error::Tool {
                tool: "ffprobe",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_duration(&String::from_utf8_lossy(&output.stdout))
    }

    /// Trims `input` to the `[start, end]` second range, re-encoded as mp3.
    ///
    /// Output is normalized to 44.1 kHz stereo so trimmed pieces can be
    /// concatenated regardless of the source layout.
    pub async fn trim(&self, input: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
        self.run(&[
            os("-y"),
            os("-i"),
            input.into(),
            os("-ss"),
            secs(start),
            os("-to"),
            secs(end),
            os("-vn"),
            os("-ar"),
            os("44100"),
            os("-ac"),
            os("2"),
            os("-acodec"),
            os("libmp3lame"),
            os("-b:a"),
            os("192k"),
            output.into(),
        ])
        .await
    }

    /// Writes `duration` seconds of stereo silence as mp3.
    pub async fn silence(&self, duration: f64, output: &Path) -> Result<()> {
        self.run(&[
            os("-y"),
            os("-f"),
            os("lavfi"),
            os("-i"),
            os("anullsrc=r=44100:cl=stereo"),
            os("-t"),
            secs(duration),
            os("-acodec"),
            os("libmp3lame"),
            os("-b:a"),
            os("192k"),
            output.into(),
        ])
        .await
    }

    /// Concatenates audio files into one mp3.
    pub async fn concat<P: AsRef<Path>>(&self, inputs: &[P], output: &Path) -> Result<()> {
        let mut args = vec![os("-y")];
        for input in inputs {
            args.push(os("-i"));
            args.push(input.as_ref().into());
        }
        args.extend([
            os("-filter_complex"),
            os(&format!("concat=n={}:v=0:a=1", inputs.len())),
            os("-acodec"),
            os("libmp3lame"),
            os("-b:a"),
            os("192k"),
            output.into(),
        ]);

        self.run(&args).await
    }

    /// Downmixes to mono at 128k to shrink an oversized upload.
    pub async fn reduce(&self, input: &Path, output: &Path) -> Result<()> {
        self.run(&[
            os("-y"),
            os("-i"),
            input.into(),
            os("-ac"),
            os("1"),
            os("-acodec"),
            os("libmp3lame"),
            os("-b:a"),
            os("128k"),
            output.into(),
        ])
        .await
    }

    /// Runs ffmpeg with the given arguments.
    async fn run(&self, args: &[OsString]) -> Result<()> {
        tracing::debug!(?args, "running ffmpeg");
        let output = Command::new(&self.ffmpeg_path).args(args).output().await?;

        if !output.status.success() {
            return Err(Error::Tool {
                tool: "ffmpeg",
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

fn os(s: &str) -> OsString {
    OsString::from(s)
}

fn secs(value: f64) -> OsString {
    OsString::from(format!("{:.3}", value))
}

/// Parses ffprobe duration output.
fn parse_duration(raw: &str) -> Result<f64> {
    raw.trim().parse::<f64>().map_err(|_| Error::Parse {
        tool: "ffprobe",
        detail: raw.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_output_parsing() {
        assert_eq!(parse_duration("60.023\n").unwrap(), 60.023);
        assert_eq!(parse_duration("45").unwrap(), 45.0);
        assert!(parse_duration("N/A").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn seconds_are_formatted_with_fixed_precision() {
        assert_eq!(secs(44.9), OsString::from("44.900"));
        assert_eq!(secs(5.0), OsString::from("5.000"));
    }

    #[test]
    fn discovery_fails_for_missing_binary() {
        assert!(which::which("nonexistent-ffmpeg-binary-xyz").is_err());
    }
}
