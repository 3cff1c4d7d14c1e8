//! Song generation command.

use anyhow::Context;
use clap::Args;

use encore_sonauto::{Generation, GenerationRequest};

use super::{format_bytes, print_success, print_verbose, sonauto_client, write_artifact};
use crate::Cli;

/// Prompt used when none is given, kept from the original example.
const DEFAULT_PROMPT: &str = "An upbeat rock song about how awesome programming is";

/// Generate a complete song from a text prompt.
#[derive(Args)]
pub struct SongCommand {
    /// Text description of the song to generate
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Number of songs to generate
    #[arg(long, default_value_t = 1)]
    num_songs: u32,

    /// Output filename (default: rock_song_{task_id}.ogg)
    #[arg(short = 'o', long)]
    output: Option<String>,
}

impl SongCommand {
    pub async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let client = sonauto_client()?;

        print_verbose(cli, &format!("Prompt: {}", self.prompt));

        let request = GenerationRequest {
            prompt: Some(self.prompt.clone()),
            num_songs: Some(self.num_songs),
            ..Default::default()
        };

        let task = client.songs().generate(&request).await?;
        println!("Generation started with task ID: {}", task.id());

        let generation = task
            .wait_with_progress(client.poll_interval(), |status| {
                println!("Status: {}", status);
            })
            .await?;

        display_generation(&generation);

        let song_url = generation
            .song_paths
            .first()
            .context("no song paths in result")?;
        let data = client.songs().download(song_url).await?;

        let filename = self
            .output
            .clone()
            .unwrap_or_else(|| format!("rock_song_{}.ogg", task.id()));
        let path = write_artifact(&data, &filename)?;

        print_success(&format!(
            "Song saved to {} ({})",
            path.display(),
            format_bytes(data.len())
        ));

        Ok(())
    }
}

/// Formats and displays generation results.
fn display_generation(generation: &Generation) {
    let seed = generation
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!();
    println!("{}", "=".repeat(40));
    println!("Seed: {}", seed);
    println!("Tags: {}", generation.tags.join(", "));
    println!();
    println!("Lyrics:\n{}", generation.lyrics);
    println!("{}", "=".repeat(40));
}
