//! Song transition command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use base64::Engine as _;
use clap::Args;

use encore_media::{Ffmpeg, SpliceOptions, YtDlp, plan_splice};
use encore_sonauto::InpaintRequest;

use super::{
    absolute_path, format_bytes, print_success, print_verbose, sonauto_client, write_artifact,
};
use crate::Cli;

/// Uploads above this size are reduced before submission; the API rejects
/// bodies over 40 MB.
const MAX_UPLOAD_BYTES: u64 = 35 * 1024 * 1024;

/// Splice two YouTube songs with a generated musical transition.
///
/// Downloads both songs, joins trimmed copies with a silent gap, and has
/// the music service inpaint a transition into the gap.
#[derive(Args)]
pub struct TransitionCommand {
    /// YouTube URL or video ID for the first song
    url1: String,

    /// YouTube URL or video ID for the second song
    url2: String,

    /// Seconds to keep from each song
    #[arg(long, default_value_t = 45.0)]
    song_duration: f64,

    /// Seconds of silence between the songs
    #[arg(long, default_value_t = 5.0)]
    silence: f64,

    /// Seconds to trim from the end of the first song
    #[arg(long, default_value_t = 0.0)]
    trim_from_end: f64,

    /// Seconds to trim from the start of the second song
    #[arg(long, default_value_t = 0.0)]
    trim_to_start: f64,

    /// Output filename (default: transition_{task_id}.ogg)
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Filename for the pre-inpainting concatenated audio
    /// (default: pre_inpaint_{timestamp}.mp3)
    #[arg(long)]
    pre_inpaint_output: Option<String>,
}

impl TransitionCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = sonauto_client()?;
        let ytdlp = YtDlp::from_path()?;
        let ffmpeg = Ffmpeg::from_path()?;

        let temp_dir = tempfile::tempdir()?;

        println!("Downloading audio from {}...", self.url1);
        let first = ytdlp
            .download_audio(&self.url1, &temp_dir.path().join("song1"))
            .await?;
        println!("Downloading audio from {}...", self.url2);
        let second = ytdlp
            .download_audio(&self.url2, &temp_dir.path().join("song2"))
            .await?;
        println!("Downloaded: {} and {}", first.title, second.title);

        let first_len = ffmpeg.probe_duration(&first.path).await?;
        let second_len = ffmpeg.probe_duration(&second.path).await?;
        print_verbose(
            cli,
            &format!("Durations: {:.2}s and {:.2}s", first_len, second_len),
        );

        let options = SpliceOptions {
            song_duration: self.song_duration,
            silence: self.silence,
            trim_from_end: self.trim_from_end,
            trim_to_start: self.trim_to_start,
        };
        let plan = plan_splice(first_len, second_len, &options);

        println!("Creating concatenated audio file...");
        let first_cut = temp_dir.path().join("first_cut.mp3");
        let second_cut = temp_dir.path().join("second_cut.mp3");
        let gap = temp_dir.path().join("gap.mp3");
        let concatenated = temp_dir.path().join("concatenated.mp3");

        ffmpeg.trim(&first.path, 0.0, plan.first_end, &first_cut).await?;
        ffmpeg
            .trim(&second.path, plan.second_start, plan.second_end, &second_cut)
            .await?;
        ffmpeg.silence(plan.silence, &gap).await?;
        ffmpeg
            .concat(&[&first_cut, &gap, &second_cut], &concatenated)
            .await?;

        // Keep a copy of the audio as it goes into inpainting, for comparison.
        let pre_inpaint = self.pre_inpaint_output.clone().unwrap_or_else(|| {
            format!("pre_inpaint_{}.mp3", chrono::Utc::now().timestamp())
        });
        std::fs::copy(&concatenated, &pre_inpaint)?;
        let pre_inpaint_path = absolute_path(Path::new(&pre_inpaint));
        println!(
            "Saved pre-inpainting version to: {}",
            pre_inpaint_path.display()
        );

        let upload_path = self
            .shrink_if_needed(&ffmpeg, &concatenated, temp_dir.path())
            .await?;
        let audio = std::fs::read(&upload_path)?;
        print_verbose(cli, &format!("Upload size: {}", format_bytes(audio.len())));

        println!(
            "Creating transition between {:.2}s and {:.2}s...",
            plan.window_start, plan.window_end
        );

        let request = InpaintRequest {
            audio_base64: base64::engine::general_purpose::STANDARD.encode(&audio),
            sections: vec![[plan.window_start, plan.window_end]],
            lyrics: String::new(),
            tags: Vec::new(),
            selection_crop: false,
            seed: None,
        };

        let task = client.songs().inpaint(&request).await?;
        println!("Inpainting started with task ID: {}", task.id());

        let generation = task
            .wait_with_progress(client.poll_interval(), |status| {
                println!("Status: {}", status);
            })
            .await?;

        let song_url = generation
            .song_paths
            .first()
            .context("no song paths in result")?;
        let data = client.songs().download(song_url).await?;

        let filename = self
            .output
            .clone()
            .unwrap_or_else(|| format!("transition_{}.ogg", task.id()));
        let path = write_artifact(&data, &filename)?;
        print_success(&format!("Transition saved to {}", path.display()));

        println!();
        println!("Transition summary:");
        println!("- From: \"{}\"", first.title);
        println!("- To: \"{}\"", second.title);
        println!("- Pre-inpainting version: {}", pre_inpaint_path.display());
        println!("- Final result: {}", path.display());

        Ok(())
    }

    /// Reduces the upload when it exceeds the API size cap.
    async fn shrink_if_needed(
        &self,
        ffmpeg: &Ffmpeg,
        input: &Path,
        temp: &Path,
    ) -> anyhow::Result<PathBuf> {
        let size = std::fs::metadata(input)?.len();
        if size <= MAX_UPLOAD_BYTES {
            return Ok(input.to_path_buf());
        }

        println!(
            "Upload is {}; reducing to mono 128k...",
            format_bytes(size as usize)
        );
        let reduced = temp.join("concatenated_reduced.mp3");
        ffmpeg.reduce(input, &reduced).await?;

        let reduced_size = std::fs::metadata(&reduced)?.len();
        if reduced_size > MAX_UPLOAD_BYTES {
            anyhow::bail!(
                "audio is still {} after reduction; the API caps uploads at 40 MB",
                format_bytes(reduced_size as usize)
            );
        }

        Ok(reduced)
    }
}
