//! dblp2bib CLI
//!
//! Converts DBLP JSON exports into `.bib` files.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dblp2bib::{
    error::Result,
    models::Config,
    pipeline,
    services::{BatchDownloader, BibFetcher},
    storage::LocalStorage,
    utils::http,
};

/// dblp2bib - DBLP export to BibTeX converter
#[derive(Parser, Debug)]
#[command(
    name = "dblp2bib",
    version,
    about = "Convert DBLP search-result exports into BibTeX"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "dblp2bib.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download BibTeX from DBLP for each export file
    Fetch {
        /// DBLP JSON export files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the generated files (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Write locally synthesized BibTeX when a download fails
        #[arg(long)]
        fallback: bool,
    },

    /// Build BibTeX from the export fields alone, without network access
    Local {
        /// DBLP JSON export files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Directory for the generated files (default: next to each input)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    let storage = LocalStorage::new(".");

    match cli.command {
        Command::Fetch {
            inputs,
            output_dir,
            fallback,
        } => {
            if output_dir.is_some() {
                config.output.output_dir = output_dir;
            }
            if fallback {
                config.output.fallback_to_local = true;
            }
            config.validate()?;

            let client = http::create_async_client(&config.fetcher)?;
            let downloader = BatchDownloader::new(BibFetcher::new(client, &config.fetcher));
            let summary = pipeline::run_convert(&config, &downloader, &storage, &inputs).await?;

            summary.log();
            summary.into_result()?;
        }

        Command::Local { inputs, output_dir } => {
            if output_dir.is_some() {
                config.output.output_dir = output_dir;
            }
            config.validate()?;

            let summary = pipeline::run_local(&config, &storage, &inputs).await?;

            summary.log();
            summary.into_result()?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
