//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and retrieval behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if let Some(agent) = &self.fetcher.user_agent {
            if agent.trim().is_empty() {
                return Err(AppError::validation("fetcher.user_agent is empty"));
            }
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.link_label.trim().is_empty() {
            return Err(AppError::validation("fetcher.link_label is empty"));
        }
        if reqwest::header::HeaderName::from_bytes(self.fetcher.rate_limit_header.as_bytes())
            .is_err()
        {
            return Err(AppError::validation(format!(
                "fetcher.rate_limit_header '{}' is not a valid header name",
                self.fetcher.rate_limit_header
            )));
        }
        if self.output.extension.trim().is_empty() || self.output.extension.contains('/') {
            return Err(AppError::validation(
                "output.extension must be a non-empty file extension",
            ));
        }
        Ok(())
    }
}

/// HTTP client and retrieval behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests; none is sent when unset
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Visible text of the anchor that points at the BibTeX export
    #[serde(default = "defaults::link_label")]
    pub link_label: String,

    /// Response header carrying the rate-limit wait in seconds
    #[serde(default = "defaults::rate_limit_header")]
    pub rate_limit_header: String,

    /// Keep idle connections for reuse between requests
    #[serde(default)]
    pub reuse_connections: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout_secs: defaults::timeout(),
            link_label: defaults::link_label(),
            rate_limit_header: defaults::rate_limit_header(),
            reuse_connections: false,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for generated files (default: next to each input)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Extension of generated files
    #[serde(default = "defaults::extension")]
    pub extension: String,

    /// Write locally synthesized BibTeX when the download batch fails
    #[serde(default)]
    pub fallback_to_local: bool,
}

impl OutputConfig {
    /// Output path for the given input file.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dblp".to_string());
        let file_name = format!("{}.{}", stem, self.extension);

        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => input.with_file_name(file_name),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            extension: defaults::extension(),
            fallback_to_local: false,
        }
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        30
    }
    pub fn link_label() -> String {
        "download as .bib file".into()
    }
    pub fn rate_limit_header() -> String {
        "Retry-After".into()
    }
    pub fn extension() -> String {
        "bib".into()
    }
}
