//! Heading inference.
//!
//! Two passes over the document: the first computes the median span font
//! size as the body text baseline, the second runs every line through an
//! ordered rule table.

use super::config::{LevelCounting, OutlineConfig};
use super::line::LineFacts;
use super::patterns::PatternSet;
use crate::model::{HeadingEntry, HeadingLevel, LayoutBlock, LayoutDocument};

/// A single rule of the heading decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Whole-line dates are never headings.
    Date,
    /// Table-of-contents lines with dot leaders are never headings.
    DotLeader,
    /// `1.2 Background` style numbering; level follows the dot count.
    Numbered,
    /// Lines ending in `:` are H1.
    TrailingColon,
    /// Large or bold text is H1 when long enough.
    Emphasis,
}

/// Rules in precedence order. The first rule with an opinion decides.
pub const RULES: [Rule; 5] = [
    Rule::Date,
    Rule::DotLeader,
    Rule::Numbered,
    Rule::TrailingColon,
    Rule::Emphasis,
];

/// What a rule decided about a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The line is a heading at this level.
    Heading(HeadingLevel),
    /// The line is dropped.
    Reject,
}

/// Outcome of running a line through [`RULES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The rule that decided, or `None` when no rule applied (body text)
    pub rule: Option<Rule>,
    /// The decision
    pub decision: Decision,
}

impl Classification {
    /// Heading level if the line was accepted.
    pub fn level(&self) -> Option<HeadingLevel> {
        match self.decision {
            Decision::Heading(level) => Some(level),
            Decision::Reject => None,
        }
    }
}

/// Inputs shared by every rule evaluation within one document.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Thresholds
    pub config: &'a OutlineConfig,
    /// Compiled classifiers
    pub patterns: &'a PatternSet,
    /// Median span font size of the document
    pub baseline: f64,
}

impl Rule {
    /// Evaluate the rule. `None` means the rule does not apply and the next
    /// one should be consulted.
    pub fn evaluate(self, line: &LineFacts, ctx: &RuleContext<'_>) -> Option<Decision> {
        let text = line.text.as_str();
        match self {
            Rule::Date => ctx.patterns.is_date(text).then_some(Decision::Reject),
            Rule::DotLeader => ctx.patterns.has_dot_leader(text).then_some(Decision::Reject),
            Rule::Numbered => ctx
                .patterns
                .is_numbered(text)
                .then(|| Decision::Heading(numbered_level(text, ctx))),
            Rule::TrailingColon => text
                .ends_with(':')
                .then_some(Decision::Heading(HeadingLevel::H1)),
            Rule::Emphasis => {
                let large = f64::from(line.max_font_size) >= ctx.config.size_ratio * ctx.baseline;
                if !(large || line.is_bold()) {
                    return None;
                }
                if line.char_len() < ctx.config.min_heading_length {
                    Some(Decision::Reject)
                } else {
                    Some(Decision::Heading(HeadingLevel::H1))
                }
            }
        }
    }
}

fn numbered_level(text: &str, ctx: &RuleContext<'_>) -> HeadingLevel {
    let counted = match ctx.config.level_counting {
        LevelCounting::WholeLine => text,
        LevelCounting::NumeralPrefix => ctx.patterns.numeral_prefix(text).unwrap_or(text),
    };
    HeadingLevel::from_dot_count(counted.matches('.').count())
}

/// Run a line through the decision table.
pub fn classify_line(line: &LineFacts, ctx: &RuleContext<'_>) -> Classification {
    RULES
        .iter()
        .find_map(|rule| {
            rule.evaluate(line, ctx).map(|decision| Classification {
                rule: Some(*rule),
                decision,
            })
        })
        .unwrap_or(Classification {
            rule: None,
            decision: Decision::Reject,
        })
}

/// Median font size over every span of every page, or 0 for a document
/// without spans.
pub fn baseline_font_size(doc: &LayoutDocument) -> f64 {
    let mut sizes: Vec<f64> = doc
        .pages
        .iter()
        .flat_map(|page| page.spans())
        .map(|span| f64::from(span.font_size))
        .collect();

    if sizes.is_empty() {
        return 0.0;
    }

    sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sizes.len() / 2;
    if sizes.len() % 2 == 0 {
        (sizes[mid - 1] + sizes[mid]) / 2.0
    } else {
        sizes[mid]
    }
}

/// Whether a block looks like a table and should be skipped wholesale.
pub fn is_table_like(block: &LayoutBlock, config: &OutlineConfig) -> bool {
    block.lines.len() > config.table_min_lines && block.bbox.width() > config.table_min_width
}

/// Detect headings across the whole document, in page-then-line order.
///
/// The result is not deduplicated.
pub fn infer_headings(
    doc: &LayoutDocument,
    config: &OutlineConfig,
    patterns: &PatternSet,
) -> Vec<HeadingEntry> {
    let baseline = baseline_font_size(doc);
    log::debug!("Body baseline font size: {:.2}", baseline);

    let ctx = RuleContext {
        config,
        patterns,
        baseline,
    };

    let mut headings = Vec::new();
    for page in &doc.pages {
        for block in &page.blocks {
            if is_table_like(block, config) {
                log::debug!(
                    "Page {}: skipping table-like block ({} lines, width {:.1})",
                    page.number,
                    block.lines.len(),
                    block.bbox.width()
                );
                continue;
            }

            for line in &block.lines {
                let Some(facts) = LineFacts::from_line(line) else {
                    continue;
                };
                if let Some(level) = classify_line(&facts, &ctx).level() {
                    headings.push(HeadingEntry::new(level, facts.text, page.number));
                }
            }
        }
    }

    headings
}
