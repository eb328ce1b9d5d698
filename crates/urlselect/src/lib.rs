//! urlselect - extract content from a webpage using a CSS selector
//!
//! This crate fetches a single page, applies a CSS selector to it and
//! either renders the text of the matched elements or downloads the matched
//! images into a per-host folder.
//!
//! ## Rendering
//!
//! Renderers never print. They emit structured [`Line`] values into a
//! [`LineSink`], which the caller turns into console output, JSON or a
//! captured `Vec<Line>` in tests. Three [`DisplayMode`]s are available:
//! - `Only Text` - the trimmed text of every match
//! - `Text with Hierarchy` - every element with text, indented by depth
//! - `Both Text and Tags` - every element with its own direct text, flat
//!
//! ## Images
//!
//! When a selector targets `img` elements, [`ImageDownloader`] resolves
//! each `src` against the page URL and saves the files one at a time.
//! A failed image never aborts the rest of the run.

pub mod client;
mod error;
pub mod images;
mod page;
pub mod render;
pub mod text;
mod types;

pub use client::{Scraper, ScraperBuilder};
pub use error::ScrapeError;
pub use images::{
    image_dir, image_file_name, image_sources, resolve_source, DownloadReport, ImageDownloader,
    ImageEvent, ImageFailure,
};
pub use page::Page;
pub use scraper::ElementRef;
pub use render::{render_hierarchy, render_matches, render_plain, render_tags, LineSink};
pub use text::{descendant_text, own_text};
pub use types::{classify, DisplayMode, Line, Route};

/// Default root folder for downloaded images, relative to the working directory
pub const DEFAULT_IMAGES_ROOT: &str = "images";

/// Prompt shown when asking for a display mode
pub const MODE_PROMPT: &str = "How would you like to display the content?";
