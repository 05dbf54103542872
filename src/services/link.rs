//! Landing-page link extraction.
//!
//! Finds the anchor that points at a publication's BibTeX export by its
//! visible text.

use scraper::{ElementRef, Html};

use crate::error::{AppError, Result};
use crate::utils::resolve;

/// Return the `href` of the first anchor, in document pre-order, whose first
/// child is a text node equal to `label`.
///
/// Anchors without children, with an element as first child, or without a
/// non-empty `href` never match.
pub fn find_link_by_text(document: &Html, label: &str) -> Option<String> {
    document.tree.root().descendants().find_map(|node| {
        let element = ElementRef::wrap(node)?;
        if element.value().name() != "a" {
            return None;
        }

        let text = node.first_child()?.value().as_text()?;
        if &**text != label {
            return None;
        }

        element
            .value()
            .attr("href")
            .filter(|href| !href.is_empty())
            .map(str::to_string)
    })
}

/// Extracts the BibTeX download link from landing pages.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    label: String,
}

impl LinkExtractor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Parse `html` fetched from `page_url` and return the absolute link.
    pub fn extract(&self, html: &str, page_url: &str) -> Result<String> {
        let document = Html::parse_document(html);
        let href = find_link_by_text(&document, &self.label).ok_or_else(|| {
            AppError::LinkNotFound {
                url: page_url.to_string(),
                label: self.label.clone(),
            }
        })?;
        Ok(resolve(page_url, &href))
    }
}
