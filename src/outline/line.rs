//! Per-line text and style aggregation.

use super::normalize::clean_text;
use crate::model::{is_bold_font, LayoutLine};

/// The facts heading and title inference need about a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFacts {
    /// Space-joined normalized span texts
    pub text: String,
    /// Largest font size among the non-empty spans
    pub max_font_size: f32,
    /// Font of the first span carrying `max_font_size`
    pub font_name: String,
    /// Top edge of the line
    pub top: f32,
}

impl LineFacts {
    /// Aggregate a line. Returns `None` when no span has visible text.
    pub fn from_line(line: &LayoutLine) -> Option<Self> {
        let mut text = String::new();
        let mut largest: Option<(f32, &str)> = None;

        for span in &line.spans {
            let cleaned = clean_text(&span.text);
            if cleaned.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&cleaned);

            match largest {
                Some((size, _)) if span.font_size <= size => {}
                _ => largest = Some((span.font_size, &span.font_name)),
            }
        }

        let (max_font_size, font_name) = largest?;
        Some(Self {
            text,
            max_font_size,
            font_name: font_name.to_string(),
            top: line.bbox.y0,
        })
    }

    /// Whether the dominant font is bold.
    pub fn is_bold(&self) -> bool {
        is_bold_font(&self.font_name)
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
