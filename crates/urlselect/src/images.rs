//! Image downloads for `img` selections
//!
//! Images land in `<root>/<host>/<file name>`, where the host drops a
//! leading `www.` and the file name is the last path segment of the
//! resolved image URL. Downloads run one after another; a failed image is
//! reported and the loop moves on.

use crate::error::ScrapeError;
use scraper::ElementRef;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use url::Url;

/// Progress notification for a download run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEvent {
    /// Element had no `src` attribute
    Skipped { index: usize },
    /// Download of `file_name` is starting (1-based index)
    Started {
        index: usize,
        total: usize,
        file_name: String,
    },
    /// Image written to `path`
    Saved { index: usize, path: PathBuf },
    /// Image could not be resolved, fetched or written
    Failed {
        index: usize,
        src: String,
        message: String,
    },
}

/// A single image that could not be saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFailure {
    /// The `src` attribute as written in the page
    pub src: String,
    /// Error message
    pub message: String,
}

/// Outcome of a download run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DownloadReport {
    /// Folder the images were written to
    pub dir: PathBuf,
    /// Written files, in document order
    pub saved: Vec<PathBuf>,
    /// Images that failed
    pub failed: Vec<ImageFailure>,
    /// Elements without a `src` attribute
    pub skipped: usize,
}

/// Folder for images found on `page_url`
///
/// Only a leading `www.` is stripped, once.
pub fn image_dir(root: &Path, page_url: &Url) -> Result<PathBuf, ScrapeError> {
    let host = page_url
        .host_str()
        .ok_or_else(|| ScrapeError::MissingHost(page_url.to_string()))?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    Ok(root.join(host))
}

/// The `src` attribute of each match, `None` where it is missing
pub fn image_sources(matches: &[ElementRef<'_>]) -> Vec<Option<String>> {
    matches
        .iter()
        .map(|element| element.value().attr("src").map(str::to_string))
        .collect()
}

/// Resolve an image `src` against the page it was found on
pub fn resolve_source(src: &str, page_url: &Url) -> Result<Url, ScrapeError> {
    Ok(page_url.join(src)?)
}

/// File name for a resolved image URL
///
/// Uses the last non-empty path segment; query and fragment are never
/// part of it. A URL whose path has no segment (`https://host/`) has no
/// file name and fails that one image.
pub fn image_file_name(url: &Url) -> Result<String, ScrapeError> {
    url.path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::NoFileName(url.to_string()))
}

/// Sequential image downloader bound to one destination folder
pub struct ImageDownloader {
    client: reqwest::Client,
    dir: PathBuf,
}

impl ImageDownloader {
    /// Create the folder for `page_url` under `root` and return a downloader
    ///
    /// An existing folder is reused.
    pub async fn prepare(
        client: reqwest::Client,
        root: &Path,
        page_url: &Url,
    ) -> Result<Self, ScrapeError> {
        let dir = image_dir(root, page_url)?;
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| ScrapeError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        debug!(dir = %dir.display(), "Prepared image folder");
        Ok(Self { client, dir })
    }

    /// Destination folder
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Download every source in order, reporting progress through `on_event`
    ///
    /// Missing sources are skipped silently. Any other failure is reported
    /// for that image only; the remaining images are still attempted.
    pub async fn download_all<F>(
        &self,
        sources: &[Option<String>],
        page_url: &Url,
        mut on_event: F,
    ) -> DownloadReport
    where
        F: FnMut(ImageEvent),
    {
        let total = sources.len();
        let mut report = DownloadReport {
            dir: self.dir.clone(),
            ..Default::default()
        };

        for (position, source) in sources.iter().enumerate() {
            let index = position + 1;
            let Some(src) = source else {
                report.skipped += 1;
                on_event(ImageEvent::Skipped { index });
                continue;
            };

            let result = match self.target(src, page_url) {
                Ok((url, file_name)) => {
                    on_event(ImageEvent::Started {
                        index,
                        total,
                        file_name: file_name.clone(),
                    });
                    self.download_one(&url, &file_name).await
                }
                Err(e) => Err(e),
            };

            match result {
                Ok(path) => {
                    report.saved.push(path.clone());
                    on_event(ImageEvent::Saved { index, path });
                }
                Err(e) => {
                    warn!(src = %src, error = %e, "Image download failed");
                    let message = e.to_string();
                    report.failed.push(ImageFailure {
                        src: src.clone(),
                        message: message.clone(),
                    });
                    on_event(ImageEvent::Failed {
                        index,
                        src: src.clone(),
                        message,
                    });
                }
            }
        }

        report
    }

    /// Fetch `url` and write it to `<dir>/<file_name>`, replacing any existing file
    pub async fn download_one(&self, url: &Url, file_name: &str) -> Result<PathBuf, ScrapeError> {
        debug!(url = %url, "Fetching image");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(ScrapeError::from_reqwest)?
            .error_for_status()
            .map_err(ScrapeError::from_reqwest)?;
        let bytes = response.bytes().await.map_err(ScrapeError::from_reqwest)?;

        let path = self.dir.join(file_name);
        fs::write(&path, &bytes)
            .await
            .map_err(|source| ScrapeError::WriteFile {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    fn target(&self, src: &str, page_url: &Url) -> Result<(Url, String), ScrapeError> {
        let url = resolve_source(src, page_url)?;
        let file_name = image_file_name(&url)?;
        Ok((url, file_name))
    }
}
