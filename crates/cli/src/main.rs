mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audiokeep_core::{
    load_config, load_config_from_env, process_manifest, run_batch, validate_config,
    AudioExtractor, BatchSummary, DestinationStatus, FfmpegTranscoder, ItemReport,
    LoftyTagger, ManifestOutcome, Transcoder,
};

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(json: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_from_env().context("Failed to load configuration")?,
    };
    validate_config(&config).context("Configuration validation failed")?;

    let transcoder = FfmpegTranscoder::new(config.transcoder.clone());
    transcoder
        .validate()
        .context("The transcoder is not usable")?;
    info!("Using transcoder at {:?}", config.transcoder.ffmpeg_path);

    let extractor = AudioExtractor::new(&config, transcoder, LoftyTagger::new());

    match cli.command {
        Command::Recover { dir, recursive } => {
            let recursive = recursive || config.recovery.recursive;
            let summary = run_batch(&dir, recursive, &extractor, &config.recovery)
                .with_context(|| format!("Failed to recover {:?}", dir))?;
            print_summary(&summary, cli.json)
        }
        Command::Item { manifest } => {
            let outcome = process_manifest(&manifest, &extractor, &config.recovery)
                .with_context(|| format!("Failed to load manifest {:?}", manifest))?;
            print_outcome(&manifest, &outcome, cli.json)
        }
    }
}

fn print_summary(summary: &BatchSummary, json: bool) -> Result<()> {
    if json {
        return print_json(summary);
    }
    println!(
        "processed: {}  skipped: {}  failed: {}",
        summary.processed, summary.skipped, summary.failed
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum ItemOutput<'a> {
    Processed { report: &'a ItemReport },
    Skipped { reason: &'a str },
}

fn print_outcome(manifest: &Path, outcome: &ManifestOutcome, json: bool) -> Result<()> {
    if json {
        return print_json(&match outcome {
            ManifestOutcome::Processed(report) => ItemOutput::Processed { report },
            ManifestOutcome::Skipped { reason } => ItemOutput::Skipped { reason },
        });
    }

    match outcome {
        ManifestOutcome::Skipped { reason } => {
            println!("skipped {}: {}", manifest.display(), reason);
        }
        ManifestOutcome::Processed(report) if report.outputs.is_empty() => {
            println!("nothing to extract for {}", manifest.display());
        }
        ManifestOutcome::Processed(report) => {
            for output in &report.outputs {
                match &output.status {
                    DestinationStatus::Created { lyrics_embedded } => println!(
                        "created {}{}",
                        output.destination.display(),
                        if *lyrics_embedded { " (lyrics)" } else { "" }
                    ),
                    DestinationStatus::AlreadyExists => {
                        println!("exists  {}", output.destination.display())
                    }
                    DestinationStatus::Failed { diagnostic } => {
                        println!("failed  {}\n{}", output.destination.display(), diagnostic)
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
