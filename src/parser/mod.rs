//! PDF parsing module.

mod content;
mod layout;
mod options;
mod pdf_parser;

pub use content::{ContentInterpreter, ShownText};
pub use layout::{LayoutConfig, PageLayout};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
