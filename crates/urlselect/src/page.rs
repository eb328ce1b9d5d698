//! Fetched page and selector matching

use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched page parsed into a document tree
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    /// Parse `body` as the HTML served at `url`
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(body),
        }
    }

    /// URL the page was fetched from, used as base for relative links
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Apply a CSS selector and return the matches in document order
    ///
    /// An empty match set is an error: nothing downstream can run without
    /// at least one element.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, ScrapeError> {
        let parsed =
            Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector(e.to_string()))?;

        let matches: Vec<_> = self.document.select(&parsed).collect();
        tracing::debug!(selector, count = matches.len(), "Applied selector");

        if matches.is_empty() {
            return Err(ScrapeError::NoMatches);
        }
        Ok(matches)
    }
}
