//! Core types for urlselect

use crate::text::tag_name;
use scraper::ElementRef;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How matched elements are displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Trimmed text of each match, nothing else
    #[default]
    OnlyText,
    /// Every element with text, indented by depth
    Hierarchy,
    /// Every element with its own direct text, prefixed by its tag
    Tags,
}

impl DisplayMode {
    /// All modes in prompt order
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::OnlyText,
        DisplayMode::Hierarchy,
        DisplayMode::Tags,
    ];

    /// Label shown in the interactive prompt
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::OnlyText => "Only Text",
            DisplayMode::Hierarchy => "Text with Hierarchy",
            DisplayMode::Tags => "Both Text and Tags",
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "text" | "only text" => Ok(DisplayMode::OnlyText),
            "hierarchy" | "text with hierarchy" => Ok(DisplayMode::Hierarchy),
            "tags" | "both text and tags" => Ok(DisplayMode::Tags),
            _ => Err("Invalid mode: must be text, hierarchy or tags".to_string()),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One rendered line, emitted to a [`LineSink`](crate::LineSink)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// Introduces a match in hierarchy and tag modes (1-based index)
    Header { index: usize, tag: String },
    /// Plain text of a match
    Text { text: String },
    /// Hierarchy mode entry
    Nested {
        depth: usize,
        tag: String,
        text: String,
    },
    /// Tag mode entry
    Tagged { tag: String, text: String },
}

impl Line {
    /// Leading whitespace for a hierarchy entry at `depth`
    pub fn indent(depth: usize) -> String {
        "  ".repeat(depth)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Header { index, tag } => write!(f, "{}. <{}>", index, tag),
            Line::Text { text } => f.write_str(text),
            Line::Nested { depth, tag, text } => {
                write!(f, "{}<{}> - {}", Line::indent(*depth), tag, text)
            }
            Line::Tagged { tag, text } => write!(f, "<{}> - {}", tag, text),
        }
    }
}

/// Where a run goes after selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Download matched images
    Images,
    /// Render matched text in a display mode
    Text,
}

/// Decide between image download and text rendering
///
/// Images are chosen when the selector itself is `img` or the first
/// match is an `img` element, both compared case-insensitively.
pub fn classify(selector: &str, matches: &[ElementRef<'_>]) -> Route {
    let first_is_img = matches
        .first()
        .map(|element| tag_name(*element).eq_ignore_ascii_case("img"))
        .unwrap_or(false);

    if selector.eq_ignore_ascii_case("img") || first_is_img {
        Route::Images
    } else {
        Route::Text
    }
}
