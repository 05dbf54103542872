// src/pipeline/convert.rs

//! Export-to-BibTeX conversion over a list of input files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{Bibliography, Config, DblpList};
use crate::services::BatchDownloader;
use crate::storage::LocalStorage;
use crate::utils::http::HttpClient;

/// Outcome of a conversion run.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Files written, in input order
    pub written: Vec<PathBuf>,
    /// Inputs that produced no output, with the reason
    pub failed: Vec<(PathBuf, String)>,
    /// Inputs written from local synthesis after a failed download
    pub fallbacks: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ConvertSummary {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            written: Vec::new(),
            failed: Vec::new(),
            fallbacks: 0,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Turn a run with failed inputs into an error.
    pub fn into_result(self) -> Result<Self> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(AppError::BatchFailed {
                failed: self.failed.len(),
                total: self.total(),
            })
        }
    }

    /// Log a summary of the run.
    pub fn log(&self) {
        let elapsed = self.finished_at - self.started_at;
        log::info!(
            "Converted {}/{} inputs in {}s ({} from local fallback)",
            self.written.len(),
            self.total(),
            elapsed.num_seconds(),
            self.fallbacks
        );
        for (input, reason) in &self.failed {
            log::error!("    {}: {}", input.display(), reason);
        }
    }
}

/// Download BibTeX for each input export and write one `.bib` per input.
///
/// A failed download writes nothing for that input, unless
/// `output.fallback_to_local` is set, in which case the locally synthesized
/// entries are written instead. Other inputs are unaffected.
pub async fn run_convert<C: HttpClient>(
    config: &Config,
    downloader: &BatchDownloader<C>,
    storage: &LocalStorage,
    inputs: &[PathBuf],
) -> Result<ConvertSummary> {
    let mut summary = ConvertSummary::start();

    for (step, input) in inputs.iter().enumerate() {
        log::info!("[{}/{}] Reading {}", step + 1, inputs.len(), input.display());

        let list = match DblpList::load(input) {
            Ok(list) => list,
            Err(error) => {
                log::error!("Skipping {}: {}", input.display(), error);
                summary.failed.push((input.clone(), error.to_string()));
                continue;
            }
        };
        log::info!("Downloading {} publications", list.len());

        let bibliography = match downloader.download_all(&list.publications()).await {
            Ok(bibliography) => bibliography,
            Err(error) if config.output.fallback_to_local => {
                log::warn!(
                    "Download failed for {} ({}), writing local BibTeX instead",
                    input.display(),
                    error
                );
                summary.fallbacks += 1;
                list.to_bibliography()
            }
            Err(error) => {
                log::error!("Some errors while downloading bib for {}: {}", input.display(), error);
                summary.failed.push((input.clone(), error.to_string()));
                continue;
            }
        };

        write_output(config, storage, input, &bibliography, &mut summary).await;
    }

    summary.finished_at = Utc::now();
    Ok(summary)
}

/// Synthesize BibTeX for each input export without any network access.
pub async fn run_local(
    config: &Config,
    storage: &LocalStorage,
    inputs: &[PathBuf],
) -> Result<ConvertSummary> {
    let mut summary = ConvertSummary::start();

    for input in inputs {
        match DblpList::load(input) {
            Ok(list) => {
                write_output(config, storage, input, &list.to_bibliography(), &mut summary).await
            }
            Err(error) => {
                log::error!("Skipping {}: {}", input.display(), error);
                summary.failed.push((input.clone(), error.to_string()));
            }
        }
    }

    summary.finished_at = Utc::now();
    Ok(summary)
}

async fn write_output(
    config: &Config,
    storage: &LocalStorage,
    input: &Path,
    bibliography: &Bibliography,
    summary: &mut ConvertSummary,
) {
    let key = config.output.output_path(input);
    match storage.write_bibliography(&key, bibliography).await {
        Ok(path) => {
            log::info!("Writing: {} ({} entries)", path.display(), bibliography.len());
            summary.written.push(path);
        }
        Err(error) => {
            log::error!("Failed to write {}: {}", key.display(), error);
            summary.failed.push((input.to_path_buf(), error.to_string()));
        }
    }
}
