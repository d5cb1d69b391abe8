//! Content stream interpretation.
//!
//! Walks the text operators of a page content stream and records every shown
//! string with its font, size and position. Only what outline inference needs
//! is tracked: the text and line matrices, the CTM stack, font selection and
//! leading. Glyph widths are estimated from the font size.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};

/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A string shown on the page, in PDF user space (y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub struct ShownText {
    /// Decoded text
    pub text: String,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Effective font size after text and graphics scaling
    pub font_size: f32,
    /// Baseline start X
    pub x: f32,
    /// Baseline Y
    pub y: f32,
    /// Estimated advance width
    pub width: f32,
}

/// A 2D affine transform `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state that persists across `BT`/`ET` pairs.
#[derive(Debug, Clone)]
struct TextState {
    font_resource: Vec<u8>,
    font_name: String,
    font_size: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_resource: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
            leading: 0.0,
        }
    }
}

/// Interprets one page's content stream.
pub struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
    base_fonts: HashMap<Vec<u8>, String>,
}

impl<'a> ContentInterpreter<'a> {
    /// Prepare an interpreter for the page `page_id`.
    pub fn new(doc: &'a LopdfDocument, page_id: lopdf::ObjectId) -> Result<Self> {
        let fonts = doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let base_fonts = fonts
            .iter()
            .map(|(name, font)| {
                let base_font = font
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                (name.clone(), base_font)
            })
            .collect();

        Ok(Self {
            doc,
            fonts,
            base_fonts,
        })
    }

    /// Decode `content` and collect every non-blank shown string.
    pub fn run(&self, content: &[u8]) -> Result<Vec<ShownText>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut shown = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut state = TextState::default();
        let mut text_matrix = Matrix::IDENTITY;
        let mut line_matrix = Matrix::IDENTITY;
        let mut in_text = false;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => ctm = ctm_stack.pop().unwrap_or(Matrix::IDENTITY),
                "cm" => {
                    if let Some(m) = matrix_operand(operands) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    in_text = true;
                    text_matrix = Matrix::IDENTITY;
                    line_matrix = Matrix::IDENTITY;
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let (Some(Object::Name(name)), Some(size)) =
                        (operands.first(), operands.get(1).and_then(get_number))
                    {
                        state.font_name = self
                            .base_fonts
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                        state.font_resource = name.clone();
                        state.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (
                        operands.first().and_then(get_number),
                        operands.get(1).and_then(get_number),
                    ) {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        line_matrix = Matrix::translation(tx, ty).then(&line_matrix);
                        text_matrix = line_matrix;
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operand(operands) {
                        line_matrix = m;
                        text_matrix = m;
                    }
                }
                "T*" => {
                    line_matrix = Matrix::translation(0.0, -state.leading).then(&line_matrix);
                    text_matrix = line_matrix;
                }
                "Tj" | "'" | "\"" | "TJ" if in_text => {
                    if op.operator != "Tj" && op.operator != "TJ" {
                        line_matrix = Matrix::translation(0.0, -state.leading).then(&line_matrix);
                        text_matrix = line_matrix;
                    }

                    let (text, advance) = match op.operator.as_str() {
                        "TJ" => match operands.first() {
                            Some(Object::Array(items)) => self.show_array(items, &state),
                            _ => (String::new(), 0.0),
                        },
                        "\"" => self.show_string(operands.get(2), &state),
                        _ => self.show_string(operands.first(), &state),
                    };

                    if !text.trim().is_empty() {
                        let rendering = text_matrix.then(&ctm);
                        shown.push(ShownText {
                            text,
                            font_name: state.font_name.clone(),
                            font_size: state.font_size * rendering.vertical_scale(),
                            x: rendering.e,
                            y: rendering.f,
                            width: advance * rendering.horizontal_scale(),
                        });
                    }

                    text_matrix = Matrix::translation(advance, 0.0).then(&text_matrix);
                }
                _ => {}
            }
        }

        Ok(shown)
    }

    /// Decode one string operand; returns the text and its estimated advance
    /// in unscaled text space.
    fn show_string(&self, operand: Option<&Object>, state: &TextState) -> (String, f32) {
        match operand {
            Some(Object::String(bytes, _)) => {
                let text = self.decode(bytes, state);
                let advance = estimate_advance(&text, state.font_size);
                (text, advance)
            }
            _ => (String::new(), 0.0),
        }
    }

    /// Decode a `TJ` array. Large negative adjustments become word spaces.
    fn show_array(&self, items: &[Object], state: &TextState) -> (String, f32) {
        // 1/1000 text space units; ~0.2em reads as a word gap.
        const SPACE_THRESHOLD: f32 = 200.0;

        let mut combined = String::new();
        let mut advance = 0.0;
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    let decoded = self.decode(bytes, state);
                    advance += estimate_advance(&decoded, state.font_size);
                    combined.push_str(&decoded);
                }
                other => {
                    if let Some(n) = get_number(other) {
                        advance -= n / 1000.0 * state.font_size;
                        if -n > SPACE_THRESHOLD
                            && !combined.is_empty()
                            && !combined.ends_with(char::is_whitespace)
                        {
                            combined.push(' ');
                        }
                    }
                }
            }
        }
        (combined, advance)
    }

    fn decode(&self, bytes: &[u8], state: &TextState) -> String {
        let encoding = self
            .fonts
            .get(&state.font_resource)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(enc) => LopdfDocument::decode_text(&enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }
}

fn estimate_advance(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let n: Vec<f32> = operands[..6].iter().filter_map(get_number).collect();
    match n.as_slice() {
        &[a, b, c, d, e, f] => Some(Matrix { a, b, c, d, e, f }),
        _ => None,
    }
}

/// Extract a number from a PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode string bytes when the font carries no usable encoding.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
