//! Title and heading outline inference.
//!
//! Everything here works on a [`LayoutDocument`] and is pure: the same input
//! and [`OutlineConfig`] always yield the same [`DocumentOutline`].

mod config;
mod dedup;
mod headings;
mod line;
mod normalize;
mod patterns;
mod title;

pub use config::{LevelCounting, OutlineConfig};
pub use dedup::dedupe_headings;
pub use headings::{
    baseline_font_size, classify_line, infer_headings, is_table_like, Classification, Decision,
    Rule, RuleContext, RULES,
};
pub use line::LineFacts;
pub use normalize::clean_text;
pub use patterns::PatternSet;
pub use title::{infer_title, title_from_page};

use crate::model::{DocumentOutline, LayoutDocument};

/// Runs title inference, heading inference and deduplication.
///
/// Holds the compiled patterns so they are built once and reused across
/// documents.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    config: OutlineConfig,
    patterns: PatternSet,
}

impl OutlineExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: OutlineConfig) -> Self {
        Self {
            config,
            patterns: PatternSet::new(),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Extract the title and outline of a document.
    pub fn extract(&self, doc: &LayoutDocument) -> DocumentOutline {
        let title = infer_title(doc, &self.config);
        let headings = infer_headings(doc, &self.config, &self.patterns);
        let found = headings.len();
        let outline = dedupe_headings(headings);

        log::debug!(
            "Title {:?}; {} headings ({} duplicates dropped) across {} pages",
            title,
            outline.len(),
            found - outline.len(),
            doc.page_count()
        );

        DocumentOutline::new(title, outline)
    }
}

/// Extract an outline with a one-off configuration.
pub fn extract_outline(doc: &LayoutDocument, config: &OutlineConfig) -> DocumentOutline {
    OutlineExtractor::new(config.clone()).extract(doc)
}
