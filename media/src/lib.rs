//! External audio tooling for the encore workflows.
//!
//! Wraps the `yt-dlp` and `ffmpeg`/`ffprobe` binaries for audio download
//! and editing, and provides the pure splice arithmetic that decides where
//! two songs are cut and where the generated transition is inpainted.

mod error;
mod ffmpeg;
mod splice;
mod ytdlp;

pub use error::{Error, Result};
pub use ffmpeg::Ffmpeg;
pub use splice::{INPAINT_PADDING_SECS, SpliceOptions, SplicePlan, plan_splice};
pub use ytdlp::{DownloadedAudio, YtDlp};
