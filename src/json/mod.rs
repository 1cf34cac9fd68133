//! The textual JSON layer: the dynamic value model, the parser and the writer.
//!
//! Everything in here is wire-level and knows nothing about typed values;
//! the mapping between [`JsonValue`] trees and typed object graphs lives in
//! the serialize/deserialize drivers.

mod parse;
mod value;
mod write;

pub use parse::{DEFAULT_MAX_DEPTH, SyntaxError, SyntaxErrorKind, parse, parse_with_depth};
pub use value::{JsonObject, JsonValue};
pub use write::JsonWriter;

pub(crate) use value::format_f64;
