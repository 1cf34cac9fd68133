use std::borrow::Cow;

use crate::info::{TypeInfo, Typed};
use crate::registry::ErasedAdapter;

// -----------------------------------------------------------------------------
// FieldInfo

/// Per-field metadata of a struct: the declared name, the resolved wire
/// name(s), direction flags and optional overrides.
///
/// Built by [`#[derive(Reflect)]`](crate::derive::Reflect) from the field's
/// `#[json(...)]` attributes. The wire-name rules:
///
/// - serialization uses the explicit name when present, otherwise the
///   declared name, transformed to snake case unless the context requests
///   declared names;
/// - deserialization accepts the explicit name and every alternate name
///   first, then the declared and transformed names, so renamed fields keep
///   reading their old wire names.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    rename: Option<&'static str>,
    aliases: &'static [&'static str],
    serialize_enabled: bool,
    deserialize_enabled: bool,
    date_format: Option<&'static str>,
    adapter: Option<fn() -> &'static ErasedAdapter>,
    // `TypeInfo` is created on first access; a function pointer delays it
    // so that recursive types can be described.
    type_info: fn() -> &'static TypeInfo,
}

impl FieldInfo {
    /// Creates the metadata for a field `name` of type `T`.
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            rename: None,
            aliases: &[],
            serialize_enabled: true,
            deserialize_enabled: true,
            date_format: None,
            adapter: None,
            type_info: T::type_info,
        }
    }

    /// Sets an explicit wire name, replacing the naming strategy.
    pub fn with_rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Sets alternate wire names accepted when deserializing.
    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Excludes the field from serialization.
    pub fn skip_serializing(mut self) -> Self {
        self.serialize_enabled = false;
        self
    }

    /// Excludes the field from deserialization.
    pub fn skip_deserializing(mut self) -> Self {
        self.deserialize_enabled = false;
        self
    }

    /// Sets a field-specific date format pattern.
    pub fn with_date_format(mut self, pattern: &'static str) -> Self {
        self.date_format = Some(pattern);
        self
    }

    /// Sets a field-specific adapter, overriding registry lookup.
    pub fn with_adapter(mut self, adapter: fn() -> &'static ErasedAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Returns the declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn serialize_enabled(&self) -> bool {
        self.serialize_enabled
    }

    #[inline]
    pub const fn deserialize_enabled(&self) -> bool {
        self.deserialize_enabled
    }

    #[inline]
    pub const fn date_format(&self) -> Option<&'static str> {
        self.date_format
    }

    pub fn adapter(&self) -> Option<&'static ErasedAdapter> {
        self.adapter.map(|get| get())
    }

    /// Returns the field type's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// The name this field serializes under.
    pub fn wire_name(&self, use_field_names: bool) -> Cow<'static, str> {
        match self.rename {
            Some(rename) => Cow::Borrowed(rename),
            None if use_field_names => Cow::Borrowed(self.name),
            None => Cow::Owned(camel_to_snake(self.name)),
        }
    }

    /// Phase one of incoming-name resolution: explicit names only.
    pub(crate) fn matches_explicit(&self, key: &str) -> bool {
        self.rename == Some(key) || self.aliases.contains(&key)
    }

    /// Phase two: the declared name and its strategy-transformed form.
    pub(crate) fn matches_declared(&self, key: &str, use_field_names: bool) -> bool {
        if self.name == key {
            return true;
        }
        !use_field_names && camel_to_snake(self.name) == key
    }
}

/// Converts a camelCase name to snake_case: each uppercase letter is
/// lowercased and prefixed with `_`, except at position 0. Names that are
/// already snake case come back unchanged.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_transform() {
        assert_eq!(camel_to_snake("firstName"), "first_name");
        assert_eq!(camel_to_snake("XCoord"), "x_coord");
        assert_eq!(camel_to_snake("already_snake"), "already_snake");
        assert_eq!(camel_to_snake("a"), "a");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn wire_name_precedence() {
        let field = FieldInfo::new::<u8>("firstName");
        assert_eq!(field.wire_name(false), "first_name");
        assert_eq!(field.wire_name(true), "firstName");

        let field = FieldInfo::new::<u8>("firstName").with_rename("fn");
        assert_eq!(field.wire_name(false), "fn");
        assert_eq!(field.wire_name(true), "fn");
    }

    #[test]
    fn incoming_name_matching() {
        let field = FieldInfo::new::<u8>("firstName").with_aliases(&["legacy"]);
        assert!(field.matches_explicit("legacy"));
        assert!(!field.matches_explicit("firstName"));
        assert!(field.matches_declared("firstName", false));
        assert!(field.matches_declared("first_name", false));
        assert!(!field.matches_declared("first_name", true));
    }
}
