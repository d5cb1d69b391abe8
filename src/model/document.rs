//! Document-level layout types.

use super::LayoutPage;
use serde::{Deserialize, Serialize};

/// A parsed document: its pages of positioned text plus metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Document metadata
    pub metadata: Metadata,

    /// Pages in document order
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// First page, if any.
    pub fn first_page(&self) -> Option<&LayoutPage> {
        self.pages.first()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: LayoutPage) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Title from the document information dictionary
    pub title: Option<String>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages in the source file
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_pages() {
        let mut doc = LayoutDocument::new();
        assert!(doc.is_empty());
        assert!(doc.first_page().is_none());

        doc.add_page(LayoutPage::letter(1));
        doc.add_page(LayoutPage::letter(2));
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.first_page().map(|p| p.number), Some(1));
    }

    #[test]
    fn test_with_title() {
        let doc = LayoutDocument::new().with_title("Annual Report");
        assert_eq!(doc.metadata.title.as_deref(), Some("Annual Report"));
    }
}
