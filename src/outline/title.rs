//! Title inference.

use super::config::OutlineConfig;
use super::line::LineFacts;
use super::normalize::clean_text;
use crate::model::{LayoutDocument, LayoutPage};

/// Infer the document title.
///
/// The largest-font line in the top region of the first page wins; earlier
/// lines win ties. Falls back to the metadata title, then to
/// [`OutlineConfig::UNTITLED`].
pub fn infer_title(doc: &LayoutDocument, config: &OutlineConfig) -> String {
    if let Some(title) = doc
        .first_page()
        .and_then(|page| title_from_page(page, config))
    {
        return title;
    }

    doc.metadata
        .title
        .as_deref()
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| OutlineConfig::UNTITLED.to_string())
}

/// Pick the title candidate from a single page, if the top region has any
/// visible text.
pub fn title_from_page(page: &LayoutPage, config: &OutlineConfig) -> Option<String> {
    let limit = f64::from(page.height) * config.top_fraction;

    let mut candidates: Vec<LineFacts> = page
        .lines()
        .filter(|line| f64::from(line.bbox.y0) < limit)
        .filter_map(LineFacts::from_line)
        .collect();

    log::debug!(
        "Title region y < {:.1}: {} candidate lines",
        limit,
        candidates.len()
    );

    // Stable: encounter order breaks ties.
    candidates.sort_by(|a, b| {
        b.max_font_size
            .partial_cmp(&a.max_font_size)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    candidates.into_iter().next().map(|c| c.text)
}
