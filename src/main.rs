use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;

use qsignal::application::bootstrap::ModelsBootstrap;
use qsignal::application::ml::confidence::UniformConfidence;
use qsignal::application::scoring::ScoringPipeline;
use qsignal::config::Config;
use qsignal::infrastructure::{CsvDatasetLoader, FileArtifactStore};

#[derive(Parser)]
#[command(author, version, about = "Scores recent price records with the SVM and VQC models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML configuration file (environment variables are used when absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dataset CSV, overrides DATA_PATH
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Number of most recent records to score
    #[arg(short, long, global = true)]
    window: Option<usize>,

    /// Seed for the placeholder confidence values
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the most recent records (default)
    Predict,
    /// Print a summary of the loaded model artifacts
    Inspect,
}

fn init_logging() {
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // stdout carries the JSON response only
    let (plain_layer, json_layer) = if json {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(plain_layer)
        .with(json_layer)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env()?,
    };

    if let Some(data) = &cli.data {
        config.dataset.path = data.clone();
    }
    if let Some(window) = cli.window {
        config.scoring.window = window;
    }
    if let Some(seed) = cli.seed {
        config.scoring.confidence_seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli).context("Invalid configuration")?;

    let store = FileArtifactStore::new(config.artifacts.clone());
    let context = ModelsBootstrap::init(&store, &config.circuit)
        .context("Failed to load model artifacts")?;

    match cli.command.unwrap_or(Commands::Predict) {
        Commands::Inspect => print_json(&context.summary(), true),
        Commands::Predict => {
            let loader = CsvDatasetLoader::new(config.dataset.clone());
            let mut confidence = UniformConfidence::from_config(&config.scoring);
            let pipeline = ScoringPipeline::new(context, config.scoring.clone());

            info!(
                "Scoring last {} records of {}",
                config.scoring.window,
                config.dataset.path.display()
            );
            let response = pipeline.predict_recent(&loader, &mut confidence);
            print_json(&response, cli.pretty)
        }
    }
}
