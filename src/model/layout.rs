//! Positioned text as produced by the layout parser.
//!
//! Coordinates are in page units with the origin at the top-left corner and
//! y increasing downward.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its four edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal extent.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Vertical extent.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of a sequence of boxes, or `None` when it is empty.
    pub fn enclosing<'a, I>(boxes: I) -> Option<BBox>
    where
        I: IntoIterator<Item = &'a BBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BBox>, b| match acc {
                Some(acc) => Some(acc.union(b)),
                None => Some(*b),
            })
    }
}

/// A contiguous run of text sharing one font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpan {
    /// Raw text as decoded from the page
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Position on the page
    pub bbox: BBox,
}

impl LayoutSpan {
    /// Create a new span.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        bbox: BBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            bbox,
        }
    }

    /// Whether the font name marks this span as bold.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }
}

/// Case-insensitive "bold" substring test on a font name.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}

/// A visual row of text made of one or more spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutLine {
    /// Spans in reading order
    pub spans: Vec<LayoutSpan>,
    /// Position on the page
    pub bbox: BBox,
}

impl LayoutLine {
    /// Create a line whose bounding box encloses its spans.
    pub fn from_spans(spans: Vec<LayoutSpan>) -> Self {
        let bbox = BBox::enclosing(spans.iter().map(|s| &s.bbox)).unwrap_or_default();
        Self { spans, bbox }
    }
}

/// A layout grouping of lines, such as a paragraph or a table region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutBlock {
    /// Lines in reading order
    pub lines: Vec<LayoutLine>,
    /// Position on the page
    pub bbox: BBox,
}

impl LayoutBlock {
    /// Create a block whose bounding box encloses its lines.
    pub fn from_lines(lines: Vec<LayoutLine>) -> Self {
        let bbox = BBox::enclosing(lines.iter().map(|l| &l.bbox)).unwrap_or_default();
        Self { lines, bbox }
    }

    /// Iterate over every span in the block.
    pub fn spans(&self) -> impl Iterator<Item = &LayoutSpan> {
        self.lines.iter().flat_map(|l| l.spans.iter())
    }
}

/// One page of positioned text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number in the source document (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Blocks in reading order
    pub blocks: Vec<LayoutBlock>,
}

impl LayoutPage {
    /// Create an empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create an empty US Letter page (612 x 792 points).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: LayoutBlock) {
        self.blocks.push(block);
    }

    /// Iterate over every line on the page.
    pub fn lines(&self) -> impl Iterator<Item = &LayoutLine> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Iterate over every span on the page.
    pub fn spans(&self) -> impl Iterator<Item = &LayoutSpan> {
        self.blocks.iter().flat_map(|b| b.spans())
    }
}
