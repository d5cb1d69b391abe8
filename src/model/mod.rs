//! Document model types.
//!
//! The layout types are the contract between the PDF layout parser and the
//! outline heuristics; the outline types are what gets serialized.

mod document;
mod layout;
mod outline;

pub use document::{LayoutDocument, Metadata};
pub use layout::{is_bold_font, BBox, LayoutBlock, LayoutLine, LayoutPage, LayoutSpan};
pub use outline::{DocumentOutline, HeadingEntry, HeadingLevel};
