//! tagdrop CLI, the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tagdrop", version, about = "Interactive tagging-quiz engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz interactively
    Play {
        /// Path to a .toml quiz manifest
        #[arg(long)]
        quiz: PathBuf,

        /// Fixed shuffle seed for a reproducible pool order
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz manifest files
    Validate {
        /// Path to a quiz manifest or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Fetch a tag document and print its records
    Fetch {
        /// URL or file path of the tag document
        #[arg(long)]
        source: String,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tagdrop=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { quiz, seed, config } => commands::play::execute(quiz, seed, config).await,
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Fetch {
            source,
            timeout,
            json,
        } => commands::fetch::execute(source, timeout, json).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
