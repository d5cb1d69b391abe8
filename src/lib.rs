//! # pdfoutline
//!
//! Title and heading outline extraction for PDF documents.
//!
//! A PDF is parsed into positioned text (pages, blocks, lines, spans with
//! font size and name). From that layout the document title is inferred
//! from the largest text near the top of the first page, and headings are
//! classified line by line with an ordered rule table: dates and table of
//! contents entries are rejected, numbered lines (`1.2 Background`) get a
//! level from their dot count, lines ending in a colon and large or bold
//! lines become top-level headings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, to_json, JsonFormat, OutlineConfig};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_file("report.pdf", &OutlineConfig::default())?;
//!     println!("{}", to_json(&outline, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! Heading inference works on any [`LayoutDocument`], so layouts produced
//! elsewhere can be fed to [`OutlineExtractor`] directly.

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{process_directory, BatchOptions, BatchReport, FileOutcome};
pub use detect::{has_pdf_extension, sniff_bytes, sniff_file, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    BBox, DocumentOutline, HeadingEntry, HeadingLevel, LayoutBlock, LayoutDocument, LayoutLine,
    LayoutPage, LayoutSpan, Metadata,
};
pub use outline::{extract_outline, LevelCounting, OutlineConfig, OutlineExtractor};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::{to_json, JsonFormat};

use std::path::Path;

/// Parse a PDF file into positioned text.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<LayoutDocument> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<LayoutDocument> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<LayoutDocument> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<LayoutDocument> {
    let parser = PdfParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Extract the title and heading outline of a PDF file.
///
/// Pages whose content cannot be decoded are treated as empty.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_file, OutlineConfig};
///
/// let config = OutlineConfig::default().with_min_heading_length(5);
/// let outline = extract_file("document.pdf", &config).unwrap();
/// for entry in &outline.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P, config: &OutlineConfig) -> Result<DocumentOutline> {
    let doc = parse_file_with_options(path, ParseOptions::new().lenient())?;
    Ok(extract_outline(&doc, config))
}

/// Extract the title and heading outline of a PDF held in memory.
pub fn extract_bytes(data: &[u8], config: &OutlineConfig) -> Result<DocumentOutline> {
    let doc = parse_bytes_with_options(data, ParseOptions::new().lenient())?;
    Ok(extract_outline(&doc, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        assert!(matches!(parse_bytes(b"hello"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_rejects_bad_version() {
        let result = extract_bytes(b"%PDF-x.y\n", &OutlineConfig::default());
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/document.pdf"),
            Err(Error::Io(_))
        ));
    }
}
