//! Outline output types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading depth. Exactly three tiers are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Top-level heading
    H1,
    /// Second-level heading
    H2,
    /// Third-level heading (and anything deeper)
    H3,
}

impl HeadingLevel {
    /// Level for a numbered heading with `dots` separators in its numbering.
    pub fn from_dot_count(dots: usize) -> Self {
        match dots {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A detected heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Normalized heading text
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingEntry {
    /// Create a new heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The extraction result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Inferred document title
    pub title: String,
    /// Headings in page-then-line order
    pub outline: Vec<HeadingEntry>,
}

impl DocumentOutline {
    /// Create a new outline result.
    pub fn new(title: impl Into<String>, outline: Vec<HeadingEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Whether no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_dot_count() {
        assert_eq!(HeadingLevel::from_dot_count(0), HeadingLevel::H1);
        assert_eq!(HeadingLevel::from_dot_count(1), HeadingLevel::H2);
        assert_eq!(HeadingLevel::from_dot_count(2), HeadingLevel::H3);
        assert_eq!(HeadingLevel::from_dot_count(7), HeadingLevel::H3);
    }

    #[test]
    fn test_level_serializes_as_tag() {
        let entry = HeadingEntry::new(HeadingLevel::H2, "1.2 Background", 3);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"level":"H2","text":"1.2 Background","page":3}"#);
        assert_eq!(HeadingLevel::H3.to_string(), "H3");
    }
}
