// src/utils/http.rs

//! HTTP client utilities.
//!
//! Fetching goes through the [`HttpClient`] trait so the retrieval logic can
//! run against an in-memory server in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FetcherConfig;

/// A plain HTTP GET client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a GET request; the body is not read until [`HttpResponse::text`].
    async fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>>;
}

/// Response whose headers are available before the body is read.
#[async_trait]
pub trait HttpResponse: Send {
    fn status(&self) -> u16;

    /// URL the response was finally served from, after redirects.
    fn url(&self) -> String;

    /// Header value, looked up case-insensitively.
    fn header(&self, name: &str) -> Option<String>;

    /// Read the full body as text.
    async fn text(self: Box<Self>) -> Result<String>;
}

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        let response = reqwest::Client::get(self, url).send().await?;
        Ok(Box::new(response))
    }
}

#[async_trait]
impl HttpResponse for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    fn url(&self) -> String {
        reqwest::Response::url(self).to_string()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    async fn text(self: Box<Self>) -> Result<String> {
        Ok(reqwest::Response::text(*self).await?)
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs));

    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent.as_str());
    }
    if !config.reuse_connections {
        builder = builder.pool_max_idle_per_host(0);
    }

    Ok(builder.build()?)
}
