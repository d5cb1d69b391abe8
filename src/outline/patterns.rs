//! Line classifiers used by heading inference.

use regex::Regex;

/// Compiled line classifiers.
///
/// Build once per extraction run and share; each matcher is a pure predicate
/// over an already-normalized line.
#[derive(Debug, Clone)]
pub struct PatternSet {
    date: Regex,
    numbered: Regex,
    toc_leader: Regex,
}

impl PatternSet {
    /// Compile the classifiers.
    pub fn new() -> Self {
        Self {
            date: Regex::new(
                r"(?i)^(0?[1-9]|[12][0-9]|3[01])[\s\-/](Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*[\s\-/]\d{2,4}$",
            )
            .unwrap(),
            numbered: Regex::new(r"^(\d+(?:\.\d+)*)\s+.+").unwrap(),
            toc_leader: Regex::new(r"\.{2,}").unwrap(),
        }
    }

    /// Whole-line date such as `12 Jan 2023`, `3-March-24` or `01/dec/1999`.
    pub fn is_date(&self, line: &str) -> bool {
        self.date.is_match(line)
    }

    /// Numbered heading such as `1 Scope` or `1.2.3 Method`.
    pub fn is_numbered(&self, line: &str) -> bool {
        self.numbered.is_match(line)
    }

    /// The leading numeral group of a numbered heading (`"1.2"` for
    /// `"1.2 Background"`).
    pub fn numeral_prefix<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.numbered
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Table-of-contents line with a dot leader, such as `Introduction .... 4`.
    pub fn has_dot_leader(&self, line: &str) -> bool {
        self.toc_leader.is_match(line)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}
