//! Progress reporting for batch downloads.

use std::fmt;
use std::time::Duration;

/// Something that happened while downloading a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// A fetch of the reference at `index` is starting.
    Attempt {
        index: usize,
        total: usize,
        url: String,
        attempt: u32,
    },
    /// The server asked to wait before retrying the same reference.
    RateLimited {
        index: usize,
        url: String,
        wait: Duration,
    },
    /// A citation was isolated and appended to the output.
    Fetched {
        index: usize,
        url: String,
        bytes: usize,
    },
    /// The reference failed; the batch is aborted.
    Failed {
        index: usize,
        url: String,
        error: String,
    },
}

impl fmt::Display for DownloadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadEvent::Attempt {
                index,
                total,
                url,
                attempt,
            } => {
                write!(f, "[{}/{}] Fetching {}", index + 1, total, url)?;
                if *attempt > 1 {
                    write!(f, " (attempt {})", attempt)?;
                }
                Ok(())
            }
            DownloadEvent::RateLimited { index, url, wait } => write!(
                f,
                "[{}] Rate limited on {}, retrying in {}s",
                index + 1,
                url,
                wait.as_secs()
            ),
            DownloadEvent::Fetched { index, url, bytes } => {
                write!(f, "[{}] Got {} bytes of BibTeX for {}", index + 1, bytes, url)
            }
            DownloadEvent::Failed { index, url, error } => {
                write!(f, "[{}] Failed on {}: {}", index + 1, url, error)
            }
        }
    }
}

/// Receiver of download progress.
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &DownloadEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn on_event(&self, event: &DownloadEvent) {
        match event {
            DownloadEvent::Attempt { .. } => log::debug!("{}", event),
            DownloadEvent::RateLimited { .. } => log::warn!("{}", event),
            DownloadEvent::Fetched { .. } => log::info!("{}", event),
            DownloadEvent::Failed { .. } => log::error!("{}", event),
        }
    }
}
