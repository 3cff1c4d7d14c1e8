//! Singing telegram command.

use anyhow::Context;
use clap::Args;

use encore_lemonslice::GenerateVideoRequest;
use encore_sonauto::GenerationRequest;

use super::{lemonslice_client, print_success, print_verbose, sonauto_client, write_artifact};
use crate::Cli;

/// Character image for birthday telegrams.
const BIRTHDAY_IMAGE_URL: &str = "https://6ammc3n5zzf5ljnz.public.blob.vercel-storage.com/actor_previews/actor_preview_sophia-eBMR0dI7joEpZ542diXv7kib5AEJwz";

/// Fallback character image for every other occasion.
const DEFAULT_IMAGE_URL: &str = BIRTHDAY_IMAGE_URL;

/// Create a personalized singing telegram video.
///
/// Generates a custom song about the recipient, then has the video service
/// animate a character singing it. The two jobs run strictly in sequence:
/// the video job takes the song's artifact URL as input.
#[derive(Args)]
pub struct TelegramCommand {
    /// Name of the recipient
    #[arg(long)]
    recipient: String,

    /// Occasion (birthday, anniversary, graduation, ...)
    #[arg(long)]
    occasion: String,

    /// Custom message to include in the song
    #[arg(long)]
    message: String,

    /// Music style (pop, rock, jazz, ...)
    #[arg(long, default_value = "pop")]
    style: String,

    /// Song output filename (default: telegram_song_{task_id}.ogg)
    #[arg(long)]
    song_output: Option<String>,

    /// Video output filename (default: telegram_video_{task_id}.mp4)
    #[arg(long)]
    video_output: Option<String>,
}

impl TelegramCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        // Both keys must be present before any job is submitted.
        let sonauto = sonauto_client()?;
        let lemonslice = lemonslice_client()?;

        println!(
            "Creating a {} singing telegram for {}'s {}...",
            self.style, self.recipient, self.occasion
        );

        let prompt = build_prompt(&self.recipient, &self.occasion, &self.message, &self.style);
        print_verbose(cli, &format!("Song prompt: {}", prompt));

        println!("Generating custom song...");
        let request = GenerationRequest {
            prompt: Some(prompt),
            num_songs: Some(1),
            ..Default::default()
        };

        let task = sonauto.songs().generate(&request).await?;
        println!("Song generation started with task ID: {}", task.id());

        let generation = task
            .wait_with_progress(sonauto.poll_interval(), |status| {
                println!("Song status: {}", status);
            })
            .await?;

        let song_url = generation
            .song_paths
            .first()
            .context("no song paths in result")?
            .clone();

        println!();
        println!("{}", "=".repeat(40));
        println!("Generated lyrics:\n{}", generation.lyrics);
        println!("{}", "=".repeat(40));
        println!();

        let song_data = sonauto.songs().download(&song_url).await?;
        let song_filename = self
            .song_output
            .clone()
            .unwrap_or_else(|| format!("telegram_song_{}.ogg", task.id()));
        let song_path = write_artifact(&song_data, &song_filename)?;
        print_success(&format!("Song saved to {}", song_path.display()));

        println!();
        println!("Creating singing telegram video...");

        // The video service fetches the audio itself, so it gets the
        // remote song URL rather than the local copy.
        let video_request = GenerateVideoRequest {
            img_url: character_image(&self.occasion).to_string(),
            audio_url: song_url,
            resolution: Some("320".to_string()),
            crop_head: Some(false),
            expressiveness: Some(1.0),
            whole_body_mode: Some(true),
        };

        let job = lemonslice.video().generate(&video_request).await?;
        println!("Video generation started with job ID: {}", job.id());

        let info = job
            .wait_with_progress(lemonslice.poll_interval(), |status| {
                println!("Video status: {}", status);
            })
            .await?;

        let video_url = info.video_url.context("no video_url returned")?;
        let video_data = lemonslice.video().download(&video_url).await?;
        let video_filename = self
            .video_output
            .clone()
            .unwrap_or_else(|| format!("telegram_video_{}.mp4", task.id()));
        let video_path = write_artifact(&video_data, &video_filename)?;
        print_success(&format!("Video saved to {}", video_path.display()));

        println!();
        println!("{}", "=".repeat(60));
        println!("Singing telegram created successfully!");
        println!("Song:  {}", song_path.display());
        println!("Video: {}", video_path.display());
        println!("{}", "=".repeat(60));

        Ok(())
    }
}

/// Builds the song prompt from the telegram inputs.
fn build_prompt(recipient: &str, occasion: &str, message: &str, style: &str) -> String {
    format!(
        "A {style} song for {recipient}'s {occasion}. The song should mention that {message}"
    )
}

/// Picks the character image for an occasion.
fn character_image(occasion: &str) -> &'static str {
    match occasion.to_lowercase().as_str() {
        "birthday" => BIRTHDAY_IMAGE_URL,
        _ => DEFAULT_IMAGE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_all_inputs() {
        let prompt = build_prompt("Sarah", "birthday", "she is turning 30", "pop");
        assert_eq!(
            prompt,
            "A pop song for Sarah's birthday. The song should mention that she is turning 30"
        );
    }

    #[test]
    fn occasion_lookup_is_case_insensitive() {
        assert_eq!(character_image("Birthday"), BIRTHDAY_IMAGE_URL);
        assert_eq!(character_image("graduation"), DEFAULT_IMAGE_URL);
    }
}
