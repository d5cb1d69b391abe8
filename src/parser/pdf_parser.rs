//! PDF layout parser using lopdf.

use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId, Stream};

use crate::detect::{sniff_bytes, sniff_file};
use crate::error::{Error, Result};
use crate::model::{LayoutDocument, LayoutPage, Metadata};

use super::content::{decode_text_simple, get_number, ContentInterpreter};
use super::layout::PageLayout;
use super::options::{ErrorMode, ParseOptions};

/// US Letter, used when a page has no usable MediaBox.
const DEFAULT_MEDIA_BOX: [f32; 4] = [0.0, 0.0, 612.0, 792.0];

/// Guards against cyclic `/Parent` chains.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// PDF layout parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        sniff_file(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Parse every page into positioned text.
    pub fn parse(&self) -> Result<LayoutDocument> {
        let mut document = LayoutDocument::new();
        document.metadata = self.extract_metadata();

        let layout = PageLayout::new(self.options.layout.clone());
        for (page_num, page_id) in self.doc.get_pages() {
            let page = match self.parse_page(&layout, page_num, page_id) {
                Ok(page) => page,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to read text from page {}: {}", page_num, e);
                    let [x0, y0, x1, y1] = self.media_box(page_id);
                    LayoutPage::new(page_num, x1 - x0, y1 - y0)
                }
                Err(e) => return Err(e),
            };
            document.add_page(page);
        }

        log::debug!(
            "Parsed {} pages, {} spans",
            document.page_count(),
            document.pages.iter().map(|p| p.spans().count()).sum::<usize>()
        );

        Ok(document)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.version());
        metadata.page_count = self.page_count();
        metadata.encrypted = self.doc.is_encrypted();

        let info = self.doc.trailer.get(b"Info").ok().and_then(|info| match info {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        });
        if let Some(info) = info {
            metadata.title = get_string_from_dict(info, b"Title");
        }

        metadata
    }

    fn parse_page(&self, layout: &PageLayout, page_num: u32, page_id: ObjectId) -> Result<LayoutPage> {
        let [x0, y0, x1, y1] = self.media_box(page_id);
        let content = self.page_content(page_id)?;
        let shown = if content.is_empty() {
            Vec::new()
        } else {
            ContentInterpreter::new(&self.doc, page_id)?.run(&content)?
        };
        Ok(layout.build(page_num, x1 - x0, y1 - y0, y1, shown))
    }

    /// The page's MediaBox, following `/Parent` inheritance.
    fn media_box(&self, page_id: ObjectId) -> [f32; 4] {
        let mut current = self.doc.get_dictionary(page_id).ok();
        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(dict) = current else { break };

            if let Some(array) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|o| self.resolve(o).as_array().ok())
            {
                let n: Vec<f32> = array.iter().filter_map(|o| get_number(self.resolve(o))).collect();
                if let &[llx, lly, urx, ury] = n.as_slice() {
                    return [llx.min(urx), lly.min(ury), llx.max(urx), lly.max(ury)];
                }
            }

            current = dict
                .get(b"Parent")
                .ok()
                .and_then(|p| p.as_reference().ok())
                .and_then(|id| self.doc.get_dictionary(id).ok());
        }
        DEFAULT_MEDIA_BOX
    }

    /// Concatenated, decompressed content streams. Empty for pages without
    /// `/Contents`.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        let refs: Vec<ObjectId> = match contents {
            Object::Reference(r) => vec![*r],
            Object::Array(arr) => arr.iter().filter_map(|o| o.as_reference().ok()).collect(),
            _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
        };

        let mut content = Vec::new();
        for r in refs {
            match self.doc.get_object(r)? {
                Object::Stream(s) => {
                    content.extend_from_slice(&stream_bytes(s)?);
                    content.push(b' ');
                }
                Object::Array(inner) => {
                    for id in inner.iter().filter_map(|o| o.as_reference().ok()) {
                        let Object::Stream(s) = self.doc.get_object(id)? else {
                            return Err(Error::PdfParse("Invalid content stream".to_string()));
                        };
                        content.extend_from_slice(&stream_bytes(s)?);
                        content.push(b' ');
                    }
                }
                _ => return Err(Error::PdfParse("Invalid content stream".to_string())),
            }
        }
        Ok(content)
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

/// Raw bytes of an unfiltered stream, decoded bytes of a filtered one.
fn stream_bytes(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    stream
        .decompressed_content()
        .map_err(|e| Error::PdfParse(format!("Failed to decode content stream: {}", e)))
}

/// Helper to get a text string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        assert!(matches!(
            PdfParser::from_bytes(b"not a pdf at all"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_stream_bytes() {
        let plain = Stream::new(Dictionary::new(), b"BT ET".to_vec());
        assert_eq!(stream_bytes(&plain).unwrap(), b"BT ET");

        let mut dict = Dictionary::new();
        dict.set("Filter", Object::Name(b"RunLengthDecode".to_vec()));
        let unsupported = Stream::new(dict, b"\x02abc\x80".to_vec());
        assert!(matches!(stream_bytes(&unsupported), Err(Error::PdfParse(_))));
    }

    #[test]
    fn test_string_from_dict() {
        let mut dict = Dictionary::new();
        dict.set(
            "Title",
            Object::String(vec![0xFE, 0xFF, 0x00, 0x41, 0x00, 0x42], lopdf::StringFormat::Literal),
        );
        dict.set("Author", Object::Integer(3));
        assert_eq!(get_string_from_dict(&dict, b"Title"), Some("AB".to_string()));
        assert_eq!(get_string_from_dict(&dict, b"Author"), None);
        assert_eq!(get_string_from_dict(&dict, b"Subject"), None);
    }
}
