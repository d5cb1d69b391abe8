//! Synthetic PDF builder shared by integration tests.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// One text run: font resource, size, x, y (PDF user space), text.
pub type Run<'a> = (&'a str, i64, i64, i64, &'a str);

pub struct PdfBuilder {
    pub doc: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    kids: Vec<Object>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => bold_id,
                "F2" => regular_id,
            },
        });
        Self {
            doc,
            pages_id,
            resources_id,
            kids: Vec::new(),
        }
    }

    pub fn page(self, runs: &[Run<'_>]) -> Self {
        let mut operations = Vec::new();
        for &(font, size, x, y, text) in runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        self.page_with_operations(operations)
    }

    pub fn page_with_operations(mut self, operations: Vec<Operation>) -> Self {
        let content = Content { operations };
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        self.page_with_contents(Object::Reference(content_id))
    }

    pub fn page_with_contents(mut self, contents: Object) -> Self {
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Resources" => self.resources_id,
            "Contents" => contents,
        });
        self.kids.push(page_id.into());
        self
    }

    pub fn blank_page(mut self) -> Self {
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
        });
        self.kids.push(page_id.into());
        self
    }

    pub fn info_title(mut self, title: &str) -> Self {
        let info_id = self.doc.add_object(dictionary! {
            "Title" => Object::string_literal(title),
        });
        self.doc.trailer.set("Info", info_id);
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let count = self.kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        self.doc.objects.insert(self.pages_id, Object::Dictionary(pages));
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        self.doc.save_to(&mut buf).unwrap();
        buf
    }
}

pub const BODY: [&str; 3] = [
    "The team will deliver the work in phases.",
    "Each phase ends with a review meeting.",
    "Budget details follow in the appendix.",
];

/// Two pages: a titled first page with a numbered section and a colon
/// heading, and a body page with a dated line.
pub fn proposal_pdf() -> Vec<u8> {
    PdfBuilder::new()
        .page(&[
            ("F1", 24, 72, 720, "Project Proposal"),
            ("F2", 12, 72, 650, "1.2 Background"),
            ("F2", 10, 72, 600, BODY[0]),
            ("F2", 10, 72, 586, BODY[1]),
            ("F2", 10, 72, 572, BODY[2]),
            ("F2", 10, 72, 500, "Summary:"),
        ])
        .page(&[
            ("F2", 10, 72, 700, BODY[0]),
            ("F2", 10, 72, 686, BODY[1]),
            ("F1", 10, 72, 600, "12 Jan 2023"),
        ])
        .build()
}
