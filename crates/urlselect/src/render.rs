//! Rendering of matched elements into [`Line`]s
//!
//! Renderers are pure traversals: they read the parsed tree and push lines
//! into a [`LineSink`]. Styling and printing belong to the sink.

use crate::text::{child_elements, descendant_text, own_text, tag_name};
use crate::types::{DisplayMode, Line};
use scraper::ElementRef;

/// Destination for rendered lines
pub trait LineSink {
    /// Accept one line, in emission order
    fn emit(&mut self, line: Line);
}

impl LineSink for Vec<Line> {
    fn emit(&mut self, line: Line) {
        self.push(line);
    }
}

/// Emit `element` and its text-bearing descendants, indented by depth
///
/// An element is emitted when its descendant text is non-empty. Children
/// whose whole subtree has no text are not entered, so structural wrappers
/// without any payload never show up.
pub fn render_hierarchy<S: LineSink + ?Sized>(
    element: ElementRef<'_>,
    depth: usize,
    sink: &mut S,
) {
    let text = descendant_text(element);
    if !text.is_empty() {
        sink.emit(Line::Nested {
            depth,
            tag: tag_name(element).to_string(),
            text,
        });
    }

    for child in child_elements(element) {
        if !descendant_text(child).is_empty() {
            render_hierarchy(child, depth + 1, sink);
        }
    }
}

/// Emit every element in the subtree that directly owns text, flat
///
/// Each line carries only the element's own text, so text is never
/// repeated under an ancestor. Children are always visited, even below
/// elements that own no text themselves.
pub fn render_tags<S: LineSink + ?Sized>(element: ElementRef<'_>, sink: &mut S) {
    let text = own_text(element);
    if !text.is_empty() {
        sink.emit(Line::Tagged {
            tag: tag_name(element).to_string(),
            text,
        });
    }

    for child in child_elements(element) {
        render_tags(child, sink);
    }
}

/// Emit the trimmed text of every match that has any
pub fn render_plain<S: LineSink + ?Sized>(matches: &[ElementRef<'_>], sink: &mut S) {
    for element in matches {
        let text = descendant_text(*element);
        if !text.is_empty() {
            sink.emit(Line::Text { text });
        }
    }
}

/// Render a match set in the chosen display mode
///
/// Matches without any text are skipped in every mode. Hierarchy and tag
/// modes introduce each match with a [`Line::Header`] numbered by its
/// position in the match set.
pub fn render_matches<S: LineSink + ?Sized>(
    matches: &[ElementRef<'_>],
    mode: DisplayMode,
    sink: &mut S,
) {
    let render_one: fn(ElementRef<'_>, &mut S) = match mode {
        DisplayMode::OnlyText => return render_plain(matches, sink),
        DisplayMode::Hierarchy => |element, sink| render_hierarchy(element, 1, sink),
        DisplayMode::Tags => |element, sink| render_tags(element, sink),
    };

    for (index, element) in matches.iter().enumerate() {
        if descendant_text(*element).is_empty() {
            continue;
        }

        sink.emit(Line::Header {
            index: index + 1,
            tag: tag_name(*element).to_string(),
        });
        render_one(*element, sink);
    }
}
