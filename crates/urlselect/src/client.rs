//! HTTP client for urlselect
//!
//! [`Scraper`] owns the configured `reqwest::Client` used for both the page
//! fetch and the image downloads. Build one with [`Scraper::builder`].

use crate::error::ScrapeError;
use crate::images::ImageDownloader;
use crate::page::Page;
use crate::DEFAULT_IMAGES_ROOT;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Builder for configuring a [`Scraper`]
#[derive(Debug, Clone)]
pub struct ScraperBuilder {
    /// Custom User-Agent
    user_agent: Option<String>,
    /// Overall request timeout
    timeout: Option<Duration>,
    /// Root folder for per-host image folders
    images_root: PathBuf,
}

impl Default for ScraperBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScraperBuilder {
    /// Create a builder with the HTTP client defaults
    pub fn new() -> Self {
        Self {
            user_agent: None,
            timeout: None,
            images_root: PathBuf::from(DEFAULT_IMAGES_ROOT),
        }
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Set the overall timeout for every request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the root folder for downloaded images
    pub fn images_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.images_root = root.into();
        self
    }

    /// Build the scraper
    pub fn build(self) -> Result<Scraper, ScrapeError> {
        let mut builder = reqwest::Client::builder();

        if let Some(ua) = &self.user_agent {
            let mut headers = HeaderMap::new();
            let value = HeaderValue::from_str(ua)
                .map_err(|e| ScrapeError::RequestError(format!("Invalid User-Agent: {e}")))?;
            headers.insert(USER_AGENT, value);
            builder = builder.default_headers(headers);
        }

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(ScrapeError::ClientBuildError)?;

        Ok(Scraper {
            client,
            images_root: self.images_root,
        })
    }
}

/// Configured page fetcher and image downloader factory
#[derive(Debug, Clone)]
pub struct Scraper {
    client: reqwest::Client,
    images_root: PathBuf,
}

impl Scraper {
    /// Create a new scraper builder
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::new()
    }

    /// Create a scraper with default settings
    pub fn new() -> Result<Self, ScrapeError> {
        ScraperBuilder::new().build()
    }

    /// Fetch `url` with a single GET and parse the body
    ///
    /// Non-2xx responses are errors. There are no retries.
    pub async fn fetch_page(&self, url: &str) -> Result<Page, ScrapeError> {
        if url.is_empty() {
            return Err(ScrapeError::MissingUrl);
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ScrapeError::InvalidUrlScheme);
        }
        let parsed = Url::parse(url)?;

        debug!(url = %parsed, "Fetching page");
        let response = self
            .client
            .get(parsed.as_str())
            .send()
            .await
            .map_err(ScrapeError::from_reqwest)?
            .error_for_status()
            .map_err(ScrapeError::from_reqwest)?;

        let body = response.text().await.map_err(ScrapeError::from_reqwest)?;
        debug!(bytes = body.len(), "Page fetched");

        Ok(Page::parse(parsed, &body))
    }

    /// Prepare the image folder for `page_url` and return a downloader
    pub async fn image_downloader(&self, page_url: &Url) -> Result<ImageDownloader, ScrapeError> {
        ImageDownloader::prepare(self.client.clone(), &self.images_root, page_url).await
    }
}
