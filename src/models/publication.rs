//! Publication references and per-attempt fetch outcomes.

use std::time::Duration;

use crate::error::AppError;

/// Handle to one publication: the URL of its DBLP landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRef {
    pub landing_url: String,
}

impl PublicationRef {
    pub fn new(landing_url: impl Into<String>) -> Self {
        Self {
            landing_url: landing_url.into(),
        }
    }
}

/// Result of a single download attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    /// One isolated BibTeX record.
    Success(String),
    /// The server asked for a pause before the same reference is retried.
    RateLimited(Duration),
    /// Unrecoverable for this reference.
    Failure(AppError),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}
