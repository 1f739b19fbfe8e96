mod captions;
mod similar;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "igscout-cli")]
#[command(about = "Instagram reel captions and similar-account research")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// OCR every reel in the dataset and upload captions to Notion
    Captions {
        /// Dataset file (defaults to `IGSCOUT_DATASET_PATH`)
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Run OCR and print what would be uploaded without calling Notion
        #[arg(long)]
        dry_run: bool,
    },
    /// Find accounts similar to a profile and export their usernames
    Similar {
        /// Instagram profile URL or handle (e.g. `https://instagram.com/natgeo` or `@natgeo`)
        profile: String,
        /// Output file (defaults to `{username}_similar.txt`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = igscout_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Captions { dataset, dry_run }) => {
            captions::run_captions(&config, dataset, dry_run).await?;
        }
        Some(Commands::Similar { profile, out }) => {
            similar::run_similar(&config, &profile, out).await?;
        }
        None => println!("igscout-cli: pass `captions` or `similar <profile>` (see --help)"),
    }

    Ok(())
}
