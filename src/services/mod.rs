//! Service layer for the converter.
//!
//! This module contains the retrieval logic:
//! - Link extraction from landing pages (`LinkExtractor`)
//! - Citation isolation (`first_record`)
//! - Single-publication retrieval (`BibFetcher`)
//! - Paced batch download (`BatchDownloader`)

mod batch;
mod citation;
mod events;
mod fetcher;
mod link;
#[cfg(test)]
pub(crate) mod mock;

pub use batch::BatchDownloader;
pub use citation::{RECORD_DELIMITER, first_record};
pub use events::{DownloadEvent, EventSink, LogSink};
pub use fetcher::{BibFetcher, parse_wait_secs};
pub use link::{LinkExtractor, find_link_by_text};
