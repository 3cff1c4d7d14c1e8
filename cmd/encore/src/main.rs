//! Encore CLI - generative-media workflows from the command line.

use clap::{Parser, Subcommand};

mod commands;

use commands::{SongCommand, TelegramCommand, TransitionCommand};

/// Encore CLI - generative-media workflows from the command line.
///
/// This tool drives three batch workflows:
///   - song: generate a complete song from a text prompt
///   - telegram: create a personalized singing telegram video
///   - transition: splice two YouTube songs with a generated transition
///
/// API keys are read from the SONAUTO_API_KEY and LEMONSLICE_API_KEY
/// environment variables; a .env file in the working directory is honored.
#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Generative-media workflow CLI")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a song from a text prompt
    Song(SongCommand),
    /// Create a personalized singing telegram video
    Telegram(TelegramCommand),
    /// Splice two YouTube songs with a generated transition
    Transition(TransitionCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Song(cmd) => cmd.run(&cli).await,
        Commands::Telegram(cmd) => cmd.run(&cli).await,
        Commands::Transition(cmd) => cmd.run(&cli).await,
    }
}
