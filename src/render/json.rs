//! JSON rendering for document outlines.

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline to JSON. Non-ASCII text is written as-is.
pub fn to_json(outline: &DocumentOutline, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(outline),
        JsonFormat::Compact => serde_json::to_string(outline),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingEntry, HeadingLevel};

    fn sample() -> DocumentOutline {
        DocumentOutline::new(
            "Project Proposal",
            vec![
                HeadingEntry::new(HeadingLevel::H1, "Summary:", 1),
                HeadingEntry::new(HeadingLevel::H2, "1.2 Background", 2),
            ],
        )
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        let expected = r#"{
  "title": "Project Proposal",
  "outline": [
    {
      "level": "H1",
      "text": "Summary:",
      "page": 1
    },
    {
      "level": "H2",
      "text": "1.2 Background",
      "page": 2
    }
  ]
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&DocumentOutline::new("Untitled Document", Vec::new()), JsonFormat::Compact)
            .unwrap();
        assert_eq!(json, r#"{"title":"Untitled Document","outline":[]}"#);
    }

    #[test]
    fn test_non_ascii_is_literal() {
        let outline = DocumentOutline::new(
            "Résumé",
            vec![HeadingEntry::new(HeadingLevel::H1, "概要", 1)],
        );
        let json = to_json(&outline, JsonFormat::Compact).unwrap();
        assert!(json.contains("Résumé"));
        assert!(json.contains("概要"));
        assert!(!json.contains("\\u"));
    }
}
