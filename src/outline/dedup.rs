//! Heading deduplication.

use std::collections::HashSet;

use crate::model::HeadingEntry;

/// Drop every heading whose `(text, page)` pair was already seen.
///
/// The first occurrence survives and relative order is preserved. Identical
/// text on different pages is kept.
pub fn dedupe_headings(headings: Vec<HeadingEntry>) -> Vec<HeadingEntry> {
    let mut seen: HashSet<(String, u32)> = HashSet::with_capacity(headings.len());
    headings
        .into_iter()
        .filter(|h| seen.insert((h.text.clone(), h.page)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_keeps_first_occurrence() {
        let headings = vec![
            HeadingEntry::new(HeadingLevel::H1, "Overview", 3),
            HeadingEntry::new(HeadingLevel::H2, "1.1 Scope", 3),
            HeadingEntry::new(HeadingLevel::H3, "Overview", 3),
        ];
        let deduped = dedupe_headings(headings);
        assert_eq!(
            deduped,
            vec![
                HeadingEntry::new(HeadingLevel::H1, "Overview", 3),
                HeadingEntry::new(HeadingLevel::H2, "1.1 Scope", 3),
            ]
        );
    }

    #[test]
    fn test_same_text_on_other_pages_survives() {
        let headings = vec![
            HeadingEntry::new(HeadingLevel::H1, "Overview", 1),
            HeadingEntry::new(HeadingLevel::H1, "Overview", 2),
            HeadingEntry::new(HeadingLevel::H1, "Overview", 1),
        ];
        let deduped = dedupe_headings(headings);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].page, 1);
        assert_eq!(deduped[1].page, 2);
    }

    #[test]
    fn test_empty() {
        assert!(dedupe_headings(Vec::new()).is_empty());
    }
}
