//! Whitespace normalization.

/// Trim `text` and collapse every internal whitespace run to one ASCII space.
///
/// No other transformation is applied: case, punctuation and non-ASCII
/// characters pass through untouched.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
