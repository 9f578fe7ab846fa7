//! Submodule candidate extraction
//!
//! Each structural selector is run over the whole document, broad to
//! narrow. A matched element yields a title (its first heading or anchor, or
//! itself) and a description (the next `p`/`div` in document order, or
//! itself). Later matches overwrite earlier ones with the same title.

use crate::extract::text::{clean_text, visible_text};
use crate::model::Submodules;
use scraper::{ElementRef, Html, Selector};

/// Titles shorter than this are noise (icons, bullets, "Go")
const MIN_TITLE_LEN: usize = 3;

/// Runs every selector over the document and collects title/description pairs
pub fn extract_submodules(document: &Html, selectors: &[Selector]) -> Submodules {
    let mut submodules = Submodules::new();

    for selector in selectors {
        for element in document.select(selector) {
            let title_element = first_title_descendant(element).unwrap_or(element);
            let title = clean_text(&visible_text(title_element, ""));
            if title.len() < MIN_TITLE_LEN {
                continue;
            }

            let description_element = next_description_element(element).unwrap_or(element);
            let mut description = clean_text(&visible_text(description_element, ""));
            if description.is_empty() || description == title {
                description = placeholder_description(&title);
            }

            tracing::trace!("Submodule candidate '{}'", title);
            submodules.insert(title, description);
        }
    }

    submodules
}

/// Description used when nothing better than the title itself is available
pub fn placeholder_description(title: &str) -> String {
    format!("Details for {}", title)
}

fn is_title_tag(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "h1" | "h2" | "h3" | "a")
}

fn is_description_tag(element: &ElementRef<'_>) -> bool {
    matches!(element.value().name(), "p" | "div")
}

/// First heading or anchor strictly inside `element`
fn first_title_descendant(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(is_title_tag)
}

/// First `p`/`div` after the start of `element` in document order
///
/// The element's own descendants come first, then everything that follows
/// it in the document.
fn next_description_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if let Some(inner) = element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(is_description_tag)
    {
        return Some(inner);
    }

    let mut current = *element;
    loop {
        for sibling in current.next_siblings() {
            if let Some(found) = sibling
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(is_description_tag)
            {
                return Some(found);
            }
        }
        current = current.parent()?;
    }
}
