//! Image-list commands: sampling, compression and header images.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use yysk_core::{load_presets, AppConfig, HeaderImageOptions};
use yysk_media::{
    compress, representative_sample, HeaderImageBuilder, HttpFetcher, InMemoryWarmCache,
    Prewarmer, ServiceEndpoint,
};

#[derive(Debug, Args)]
pub(crate) struct HeaderArgs {
    /// Source name passed to the service, e.g. pixiv
    #[arg(long)]
    pub name: String,
    /// Work id passed to the service
    #[arg(long)]
    pub id: String,
    /// Start from a named preset
    #[arg(long)]
    pub preset: Option<String>,
    /// Presets file; defaults to YYSK_PRESETS_PATH
    #[arg(long)]
    pub presets: Option<PathBuf>,
    #[arg(long)]
    pub image_size: Option<usize>,
    #[arg(long)]
    pub image_duration: Option<f64>,
    #[arg(long)]
    pub transition_duration: Option<f64>,
    #[arg(long)]
    pub image_fps: Option<u32>,
    #[arg(long)]
    pub target_column: Option<u32>,
    #[arg(long)]
    pub waterfall_target_count: Option<usize>,
    /// Only print the URLs
    #[arg(long)]
    pub no_prewarm: bool,
    /// Image URLs in display order (reads stdin when none are given)
    pub urls: Vec<String>,
}

pub(crate) fn run_sample(target: usize, urls: Vec<String>) -> anyhow::Result<()> {
    let urls = urls_or_stdin(urls)?;
    for url in representative_sample(&urls, target) {
        println!("{url}");
    }
    Ok(())
}

pub(crate) fn run_compress(urls: Vec<String>) -> anyhow::Result<()> {
    let urls = urls_or_stdin(urls)?;
    println!("{}", serde_json::to_string_pretty(&compress(&urls))?);
    Ok(())
}

pub(crate) async fn run_header(config: &AppConfig, args: HeaderArgs) -> anyhow::Result<()> {
    let options = resolve_options(config, &args)?;
    let urls = urls_or_stdin(args.urls)?;

    let mut builder = HeaderImageBuilder::new(ServiceEndpoint::from_config(config));
    if config.prewarm_enabled && !args.no_prewarm {
        let fetcher = HttpFetcher::from_config(config).context("failed to build HTTP client")?;
        let cache = InMemoryWarmCache::new(Duration::from_secs(config.warm_ttl_secs));
        builder = builder.with_prewarmer(Prewarmer::new(Arc::new(fetcher), Arc::new(cache)));
    }

    let (images, prewarm) = builder.build(&args.name, &args.id, &urls, &options);
    println!("{}", serde_json::to_string_pretty(&images)?);

    // The runtime shuts down with the process, so wait for the warm-up here.
    if prewarm.is_scheduled() {
        let report = prewarm.join().await;
        tracing::info!(
            warmed = report.warmed,
            skipped = report.skipped,
            failed = report.failed,
            "prewarm finished"
        );
    }

    Ok(())
}

/// Preset (if any) with command-line overrides applied, validated.
pub(crate) fn resolve_options(
    config: &AppConfig,
    args: &HeaderArgs,
) -> anyhow::Result<HeaderImageOptions> {
    let mut options = match &args.preset {
        Some(preset) => {
            let path = args
                .presets
                .as_ref()
                .or(config.presets_path.as_ref())
                .context("--preset needs --presets or YYSK_PRESETS_PATH")?;
            let presets = load_presets(path)?;
            presets
                .get(preset)
                .with_context(|| format!("preset '{preset}' not found in {}", path.display()))?
                .options
                .clone()
        }
        None => HeaderImageOptions::default(),
    };

    if let Some(v) = args.image_size {
        options.image_size = v;
    }
    if let Some(v) = args.image_duration {
        options.image_duration = v;
    }
    if let Some(v) = args.transition_duration {
        options.transition_duration = v;
    }
    if let Some(v) = args.image_fps {
        options.image_fps = v;
    }
    if let Some(v) = args.target_column {
        options.target_column = v;
    }
    if let Some(v) = args.waterfall_target_count {
        options.waterfall_target_count = v;
    }

    options.validate()?;
    Ok(options)
}

fn urls_or_stdin(urls: Vec<String>) -> anyhow::Result<Vec<String>> {
    if !urls.is_empty() {
        return Ok(urls);
    }
    let mut from_stdin = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("failed to read URLs from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            from_stdin.push(line.to_owned());
        }
    }
    Ok(from_stdin)
}
