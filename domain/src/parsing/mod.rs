//! Structured-output parsing
//!
//! Model completions are free-form text that usually, but not always,
//! contain a JSON object. This module is the boundary that absorbs every
//! malformed-output case: nothing here returns an error.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`extract_json_object`] | Find and parse the JSON object in a completion |
//! | [`parse_json_object_or`] | Same, with a caller-supplied fallback object |
//! | [`fields`] | Lenient typed readers over a parsed object |

pub mod fields;
mod json;

pub use json::{JsonObject, extract_json_object, parse_json_object_or};
