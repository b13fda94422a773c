use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sumsum::config::Config;
use sumsum::error::Result;

#[derive(Parser)]
#[command(name = "sumsum")]
#[command(about = "Local text summarization backed by Ollama", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the environment: check Ollama, download the model, register it
    Init,
    /// Summarize a text file
    Run {
        /// Path to the text file to summarize
        file: PathBuf,
        /// Also print timing and token statistics
        #[arg(short, long)]
        verbose: bool,
    },
    /// Show provisioning status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => sumsum::provision::init(&config).await,
        Commands::Run { file, verbose } => sumsum::summarize::run(&config, &file, verbose).await,
        Commands::Status => sumsum::provision::status(&config).await,
    }
}
