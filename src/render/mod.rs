//! Rendering of extracted outlines.

mod json;

pub use json::{to_json, JsonFormat};
