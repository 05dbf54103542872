//! Sequential batch download with rate-limit pacing.
//!
//! Each reference is retried in place for as long as the server keeps
//! answering with a wait directive; any other failure aborts the batch and
//! discards what was collected so far.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Bibliography, FetchOutcome, PublicationRef};
use crate::services::events::{DownloadEvent, EventSink, LogSink};
use crate::services::fetcher::BibFetcher;
use crate::utils::http::HttpClient;

/// Drives a [`BibFetcher`] over an ordered list of references.
pub struct BatchDownloader<C> {
    fetcher: BibFetcher<C>,
    sink: Arc<dyn EventSink>,
}

impl<C: HttpClient> BatchDownloader<C> {
    pub fn new(fetcher: BibFetcher<C>) -> Self {
        Self {
            fetcher,
            sink: Arc::new(LogSink),
        }
    }

    /// Report progress to `sink` instead of the log.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Download one record per reference, in input order.
    ///
    /// Only one fetch is outstanding at a time. The next reference is not
    /// started until the current one succeeds.
    pub async fn download_all(&self, publications: &[PublicationRef]) -> Result<Bibliography> {
        let total = publications.len();
        let mut bibliography = Bibliography::new();

        for (index, publication) in publications.iter().enumerate() {
            let url = &publication.landing_url;
            let mut attempt = 1;

            let record = loop {
                self.emit(DownloadEvent::Attempt {
                    index,
                    total,
                    url: url.clone(),
                    attempt,
                });

                match self.fetcher.fetch(publication).await {
                    FetchOutcome::Success(record) => break record,
                    FetchOutcome::RateLimited(wait) => {
                        self.emit(DownloadEvent::RateLimited {
                            index,
                            url: url.clone(),
                            wait,
                        });
                        tokio::time::sleep(wait).await;
                        attempt += 1;
                    }
                    FetchOutcome::Failure(error) => {
                        self.emit(DownloadEvent::Failed {
                            index,
                            url: url.clone(),
                            error: error.to_string(),
                        });
                        return Err(error);
                    }
                }
            };

            self.emit(DownloadEvent::Fetched {
                index,
                url: url.clone(),
                bytes: record.len(),
            });
            bibliography.push(record);
        }

        Ok(bibliography)
    }

    fn emit(&self, event: DownloadEvent) {
        self.sink.on_event(&event);
    }
}
