//! Grouping of shown text into lines and blocks.
//!
//! Spans are converted to top-down page coordinates, grouped into lines by
//! baseline, and lines are grouped into blocks where vertical spacing, font
//! size or left margin changes noticeably.

use super::content::ShownText;
use crate::model::{BBox, LayoutBlock, LayoutLine, LayoutPage, LayoutSpan};

/// Approximate ascender height as a fraction of the font size.
const ASCENT: f32 = 0.8;
/// Approximate descender depth as a fraction of the font size.
const DESCENT: f32 = 0.2;

/// Thresholds for line and block grouping.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Baseline tolerance for joining spans into a line (fraction of font size)
    pub line_tolerance: f32,
    /// A gap larger than this multiple of the average line gap starts a block
    pub block_gap_factor: f32,
    /// A font size change larger than this (points) starts a block
    pub block_size_delta: f32,
    /// A left margin shift larger than this (points) starts a block
    pub block_indent_delta: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_tolerance: 0.3,
            block_gap_factor: 1.5,
            block_size_delta: 1.0,
            block_indent_delta: 20.0,
        }
    }
}

/// A span with its baseline, in top-down coordinates.
#[derive(Debug, Clone)]
struct PlacedSpan {
    baseline: f32,
    span: LayoutSpan,
}

/// Builds [`LayoutPage`]s from interpreted content.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    config: LayoutConfig,
}

impl PageLayout {
    /// Create a layout builder with custom thresholds.
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a page. `page_top` is the user-space Y of the page's top edge.
    pub fn build(
        &self,
        number: u32,
        width: f32,
        height: f32,
        page_top: f32,
        shown: Vec<ShownText>,
    ) -> LayoutPage {
        let mut page = LayoutPage::new(number, width, height);

        let placed: Vec<PlacedSpan> = shown
            .into_iter()
            .map(|s| place(s, page_top))
            .collect();

        let lines = self.group_lines(placed);
        for block in self.group_blocks(lines) {
            page.add_block(block);
        }
        page
    }

    /// Join spans sharing a baseline (within tolerance) into lines, top to
    /// bottom, each line ordered left to right.
    fn group_lines(&self, mut spans: Vec<PlacedSpan>) -> Vec<(f32, LayoutLine)> {
        spans.sort_by(|a, b| {
            a.baseline
                .partial_cmp(&b.baseline)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    a.span
                        .bbox
                        .x0
                        .partial_cmp(&b.span.bbox.x0)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
        });

        let mut lines = Vec::new();
        let mut current: Vec<LayoutSpan> = Vec::new();
        let mut current_baseline: Option<f32> = None;

        for placed in spans {
            let tolerance = placed.span.font_size * self.config.line_tolerance;
            match current_baseline {
                Some(baseline) if (placed.baseline - baseline).abs() <= tolerance => {
                    current.push(placed.span);
                }
                _ => {
                    if let Some(baseline) = current_baseline {
                        lines.push((baseline, finish_line(std::mem::take(&mut current))));
                    }
                    current_baseline = Some(placed.baseline);
                    current.push(placed.span);
                }
            }
        }

        if let Some(baseline) = current_baseline {
            lines.push((baseline, finish_line(current)));
        }

        lines
    }

    /// Split lines into blocks at paragraph-like breaks.
    fn group_blocks(&self, lines: Vec<(f32, LayoutLine)>) -> Vec<LayoutBlock> {
        let avg_gap = average_gap(&lines);

        let mut blocks = Vec::new();
        let mut current: Vec<LayoutLine> = Vec::new();
        let mut previous: Option<(f32, f32, f32)> = None; // (baseline, size, x0)

        for (baseline, line) in lines {
            let size = dominant_size(&line);
            let x0 = line.bbox.x0;

            if let Some((prev_baseline, prev_size, prev_x0)) = previous {
                let should_break = (baseline - prev_baseline).abs()
                    > avg_gap * self.config.block_gap_factor
                    || (size - prev_size).abs() > self.config.block_size_delta
                    || (x0 - prev_x0).abs() > self.config.block_indent_delta;

                if should_break && !current.is_empty() {
                    blocks.push(LayoutBlock::from_lines(std::mem::take(&mut current)));
                }
            }

            previous = Some((baseline, size, x0));
            current.push(line);
        }

        if !current.is_empty() {
            blocks.push(LayoutBlock::from_lines(current));
        }

        blocks
    }
}

fn place(shown: ShownText, page_top: f32) -> PlacedSpan {
    let baseline = page_top - shown.y;
    let bbox = BBox::new(
        shown.x,
        baseline - shown.font_size * ASCENT,
        shown.x + shown.width,
        baseline + shown.font_size * DESCENT,
    );
    PlacedSpan {
        baseline,
        span: LayoutSpan::new(shown.text, shown.font_size, shown.font_name, bbox),
    }
}

fn finish_line(mut spans: Vec<LayoutSpan>) -> LayoutLine {
    spans.sort_by(|a, b| {
        a.bbox
            .x0
            .partial_cmp(&b.bbox.x0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    LayoutLine::from_spans(spans)
}

/// Character-weighted average font size of a line.
fn dominant_size(line: &LayoutLine) -> f32 {
    let total_chars: usize = line.spans.iter().map(|s| s.text.chars().count()).sum();
    if total_chars == 0 {
        return line.spans.first().map(|s| s.font_size).unwrap_or(0.0);
    }
    let weighted: f32 = line
        .spans
        .iter()
        .map(|s| s.font_size * s.text.chars().count() as f32)
        .sum();
    weighted / total_chars as f32
}

fn average_gap(lines: &[(f32, LayoutLine)]) -> f32 {
    let gaps: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[1].0 - w[0].0).abs())
        .filter(|g| *g > 0.1)
        .collect();

    if gaps.is_empty() {
        return 12.0;
    }
    gaps.iter().sum::<f32>() / gaps.len() as f32
}
