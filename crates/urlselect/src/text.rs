//! Text extraction over parsed elements
//!
//! Two distinct rules are used by the renderers:
//! - [`descendant_text`]: every text node in the subtree
//! - [`own_text`]: only the element's direct text-node children
//!
//! Both return trimmed strings; an empty string means "no text".

use scraper::ElementRef;

/// All text contained anywhere in the element's subtree, trimmed
pub fn descendant_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text directly owned by the element, trimmed
///
/// Direct text nodes that are only whitespace are dropped, the rest are
/// concatenated as-is before the final trim. Text belonging to nested
/// child elements never contributes.
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .filter(|text| !text.trim().is_empty())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Lower-case tag name of the element
pub fn tag_name(element: ElementRef<'_>) -> &str {
    element.value().name()
}

/// Child elements in document order, skipping text and comment nodes
pub(crate) fn child_elements<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}
