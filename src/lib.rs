#![doc = include_str!("../README.md")]

// We use `crate` in the crate itself, but doctests and the derive macro
// refer to `jsonbind`; this alias makes both spellings resolve everywhere.
extern crate self as jsonbind;

// -----------------------------------------------------------------------------
// Modules

mod de;
mod reflection;
mod ser;

pub mod adapter;
pub mod api;
pub mod impls;
pub mod info;
pub mod json;
pub mod ops;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-level exports

pub use api::{
    ContextBuilder, Deserializer, DeserializeError, JSON_CONTENT_TYPE, SerializationContext,
    SerializeError, Serializer,
};
pub use jsonbind_derive as derive;
pub use reflection::Reflect;

use crate::info::Typed;

/// Serializes `value` into a JSON string with the default context.
///
/// # Examples
///
/// ```
/// assert_eq!(jsonbind::to_string(&vec![1, 2, 3]).unwrap(), "[1,2,3]");
/// ```
pub fn to_string<T: Reflect>(value: &T) -> Result<String, SerializeError> {
    Serializer::default().to_string(value)
}

/// Serializes `value` as JSON text into `out` with the default context.
pub fn to_writer<T: Reflect, W: std::io::Write>(
    value: &T,
    out: W,
) -> Result<(), SerializeError> {
    Serializer::default().to_writer(value, out)
}

/// Deserializes a value of type `T` from JSON text with the default
/// context.
///
/// Returns `Ok(None)` for empty, whitespace-only or literal-`null` input.
///
/// # Examples
///
/// ```
/// let numbers: Option<Vec<i64>> = jsonbind::from_str("[1,2,3]").unwrap();
/// assert_eq!(numbers, Some(vec![1, 2, 3]));
/// ```
pub fn from_str<T: Reflect + Typed>(text: &str) -> Result<Option<T>, DeserializeError> {
    Deserializer::default().from_str(text)
}

/// Deserializes a value of type `T` from a reader with the default context.
pub fn from_reader<T: Reflect + Typed, R: std::io::Read>(
    source: R,
) -> Result<Option<T>, DeserializeError> {
    Deserializer::default().from_reader(source)
}
