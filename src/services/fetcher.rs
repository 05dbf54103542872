//! Rate-limit-aware retrieval of one publication's BibTeX record.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::{FetchOutcome, FetcherConfig, PublicationRef};
use crate::services::citation::first_record;
use crate::services::link::LinkExtractor;
use crate::utils::http::{HttpClient, HttpResponse};

/// Parse a rate-limit header value as whole seconds.
///
/// Non-integer values mean "not rate limited"; negative ones wait zero.
pub fn parse_wait_secs(value: &str) -> Option<Duration> {
    let secs: i64 = value.trim().parse().ok()?;
    Some(Duration::from_secs(secs.max(0) as u64))
}

/// Resolves a landing page to its BibTeX link and downloads the record.
pub struct BibFetcher<C> {
    client: C,
    extractor: LinkExtractor,
    rate_limit_header: String,
}

impl<C: HttpClient> BibFetcher<C> {
    pub fn new(client: C, config: &FetcherConfig) -> Self {
        Self {
            client,
            extractor: LinkExtractor::new(&config.link_label),
            rate_limit_header: config.rate_limit_header.clone(),
        }
    }

    /// Run one attempt for `publication`.
    ///
    /// Every attempt re-fetches the landing page, so a retried reference
    /// costs two requests again.
    pub async fn fetch(&self, publication: &PublicationRef) -> FetchOutcome {
        match self.try_fetch(publication).await {
            Ok(outcome) => outcome,
            Err(error) => FetchOutcome::Failure(error),
        }
    }

    async fn try_fetch(&self, publication: &PublicationRef) -> Result<FetchOutcome> {
        let landing_url = &publication.landing_url;
        let landing = self.get_success(landing_url).await?;
        let page_url = landing.url();
        let page = landing.text().await?;
        let bib_url = self.extractor.extract(&page, &page_url)?;
        log::debug!("Resolved {} -> {}", landing_url, bib_url);

        let response = self.client.get(&bib_url).await?;
        if let Some(wait) = self.rate_limit_wait(response.as_ref()) {
            return Ok(FetchOutcome::RateLimited(wait));
        }
        ensure_success(response.as_ref(), &bib_url)?;

        let body = response.text().await?;
        let record = first_record(&body).ok_or(AppError::NoCitationFound { url: bib_url })?;
        Ok(FetchOutcome::Success(record.to_string()))
    }

    async fn get_success(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        let response = self.client.get(url).await?;
        ensure_success(response.as_ref(), url)?;
        Ok(response)
    }

    fn rate_limit_wait(&self, response: &dyn HttpResponse) -> Option<Duration> {
        response
            .header(&self.rate_limit_header)
            .and_then(|value| parse_wait_secs(&value))
    }
}

fn ensure_success(response: &dyn HttpResponse, url: &str) -> Result<()> {
    let status = response.status();
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(AppError::status(url, status))
    }
}
