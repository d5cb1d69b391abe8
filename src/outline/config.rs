//! Tunable thresholds for title and heading inference.

/// How the level of a numbered heading is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelCounting {
    /// Count every `.` in the line text.
    ///
    /// `"1.2 See Section 3.4.5"` counts four dots and lands on H3.
    #[default]
    WholeLine,
    /// Count only the dots inside the leading numeral group.
    ///
    /// `"1.2 See Section 3.4.5"` counts one dot and lands on H2.
    NumeralPrefix,
}

/// Configuration for outline extraction.
///
/// One immutable value is threaded through the inference functions; there is
/// no process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineConfig {
    /// Fraction of the first page's height searched for the title
    pub top_fraction: f64,

    /// Minimum characters for a style-detected heading
    pub min_heading_length: usize,

    /// Font size ratio to the body baseline that marks a heading
    pub size_ratio: f64,

    /// A block with more lines than this may be a table
    pub table_min_lines: usize,

    /// A block wider than this (in points) may be a table
    pub table_min_width: f32,

    /// Level derivation for numbered headings
    pub level_counting: LevelCounting,
}

impl OutlineConfig {
    /// Placeholder title when nothing better is found.
    pub const UNTITLED: &'static str = "Untitled Document";

    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title region fraction (clamped to `0.0..=1.0`).
    pub fn with_top_fraction(mut self, fraction: f64) -> Self {
        self.top_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Set the minimum heading length.
    pub fn with_min_heading_length(mut self, len: usize) -> Self {
        self.min_heading_length = len;
        self
    }

    /// Set the font size ratio for style-detected headings.
    pub fn with_size_ratio(mut self, ratio: f64) -> Self {
        self.size_ratio = ratio;
        self
    }

    /// Set the table exclusion thresholds.
    pub fn with_table_thresholds(mut self, min_lines: usize, min_width: f32) -> Self {
        self.table_min_lines = min_lines;
        self.table_min_width = min_width;
        self
    }

    /// Set the level derivation for numbered headings.
    pub fn with_level_counting(mut self, counting: LevelCounting) -> Self {
        self.level_counting = counting;
        self
    }
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            top_fraction: 0.3,
            min_heading_length: 3,
            size_ratio: 1.2,
            table_min_lines: 3,
            table_min_width: 400.0,
            level_counting: LevelCounting::WholeLine,
        }
    }
}
