mod gallery;
mod images;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::images::HeaderArgs;

#[derive(Debug, Parser)]
#[command(name = "yysk-cli")]
#[command(about = "Media URL utilities for feed adapters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the strip count of one gallery page
    Slice {
        /// Gallery id, e.g. 421926
        gallery_id: String,
        /// Page in the host's zero-padded form, e.g. 00001
        page: String,
    },
    /// Print unscramble-endpoint URLs for the first pages of a gallery
    Pages {
        gallery_id: String,
        /// Image CDN host serving `/media/photos/{id}/{page}.webp`
        #[arg(long)]
        cdn_host: String,
        /// Number of pages, starting at 1
        #[arg(long, default_value_t = 50)]
        count: u32,
        /// Source name passed to the service
        #[arg(long, default_value = "18comic")]
        name: String,
    },
    /// Print an evenly spaced subset of image URLs (reads stdin when none are given)
    Sample {
        #[arg(long, default_value_t = 10)]
        target: usize,
        urls: Vec<String>,
    },
    /// Print the prefix/files/suffix factoring of image URLs as JSON
    Compress { urls: Vec<String> },
    /// Build preview and waterfall URLs and warm the service cache for them
    Header(HeaderArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = yysk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Slice { gallery_id, page } => gallery::run_slice(&gallery_id, &page),
        Commands::Pages {
            gallery_id,
            cdn_host,
            count,
            name,
        } => gallery::run_pages(&config, &name, &gallery_id, &cdn_host, count),
        Commands::Sample { target, urls } => images::run_sample(target, urls)?,
        Commands::Compress { urls } => images::run_compress(urls)?,
        Commands::Header(args) => images::run_header(&config, args).await?,
    }

    Ok(())
}
