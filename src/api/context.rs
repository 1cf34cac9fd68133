use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use crate::adapter::{DateTimeAdapter, UrlAdapter, UuidAdapter};
use crate::json::DEFAULT_MAX_DEPTH;
use crate::registry::{AdapterRegistry, ErasedAdapter, JsonAdapter};

/// The content type of everything this crate reads and writes.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The default date pattern: ISO-8601 with milliseconds and a numeric
/// offset, e.g. `2026-08-06T17:45:30.123+02:00`.
///
/// Patterns use the `time` crate's format-description syntax and are parsed
/// per call, so no formatter state is ever shared.
pub const DEFAULT_DATE_FORMAT: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].\
                                       [subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]";

// -----------------------------------------------------------------------------
// SerializationContext

/// Immutable configuration plus the adapter registry, shared by every
/// conversion call.
///
/// Built once through [`ContextBuilder`] and read-only afterwards:
/// registering further adapters means building a new context. A context is
/// cheap to clone and safe for concurrent read-only use from multiple
/// threads.
///
/// # Examples
///
/// ```
/// use jsonbind::SerializationContext;
///
/// let context = SerializationContext::builder()
///     .serialize_nulls(true)
///     .pretty_printing("  ")
///     .date_format("[year]-[month]-[day]")
///     .build();
///
/// assert!(context.serialize_nulls());
/// assert_eq!(context.indentation(), Some("  "));
/// ```
#[derive(Clone)]
pub struct SerializationContext {
    serialize_nulls: bool,
    use_field_names: bool,
    date_format: Arc<str>,
    indentation: Option<Arc<str>>,
    max_depth: usize,
    adapters: Arc<AdapterRegistry>,
}

impl SerializationContext {
    /// Starts building a context, with the built-in date-time, UUID and URL
    /// adapters pre-registered.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// Whether null-valued members are emitted (`false` drops them).
    #[inline]
    pub const fn serialize_nulls(&self) -> bool {
        self.serialize_nulls
    }

    /// Whether declared field names go on the wire untransformed, disabling
    /// the camel-to-snake naming strategy.
    #[inline]
    pub const fn use_field_names(&self) -> bool {
        self.use_field_names
    }

    /// The date pattern, in `time` format-description syntax.
    #[inline]
    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// The indentation unit for pretty printing; `None` means compact.
    pub fn indentation(&self) -> Option<&str> {
        self.indentation.as_deref()
    }

    /// The maximum nesting depth accepted in either direction.
    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Looks up the adapter registered for exactly the given type.
    #[inline]
    pub fn adapter(&self, type_id: TypeId) -> Option<&ErasedAdapter> {
        self.adapters.get(type_id)
    }

    /// A copy of this context with the date pattern replaced, used for
    /// per-field `#[json(date_format = ...)]` overrides. The registry is
    /// shared, not cloned.
    pub(crate) fn with_date_format(&self, pattern: &str) -> Self {
        let mut context = self.clone();
        context.date_format = Arc::from(pattern);
        context
    }
}

impl Default for SerializationContext {
    fn default() -> Self {
        ContextBuilder::new().build()
    }
}

impl fmt::Debug for SerializationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationContext")
            .field("serialize_nulls", &self.serialize_nulls)
            .field("use_field_names", &self.use_field_names)
            .field("date_format", &self.date_format)
            .field("indentation", &self.indentation)
            .field("max_depth", &self.max_depth)
            .field("adapters", &self.adapters)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ContextBuilder

/// Builds a [`SerializationContext`].
///
/// Defaults: nulls dropped, naming strategy on, the ISO-8601 date pattern,
/// compact output, depth limit [`DEFAULT_MAX_DEPTH`].
pub struct ContextBuilder {
    serialize_nulls: bool,
    use_field_names: bool,
    date_format: String,
    indentation: Option<String>,
    max_depth: usize,
    adapters: AdapterRegistry,
}

impl ContextBuilder {
    pub fn new() -> Self {
        let mut adapters = AdapterRegistry::new();
        adapters.register(DateTimeAdapter);
        adapters.register(UuidAdapter);
        adapters.register(UrlAdapter);
        Self {
            serialize_nulls: false,
            use_field_names: false,
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
            indentation: None,
            max_depth: DEFAULT_MAX_DEPTH,
            adapters,
        }
    }

    /// Emit null-valued members instead of dropping them.
    pub fn serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    /// Put declared field names on the wire untransformed.
    pub fn use_field_names(mut self, use_field_names: bool) -> Self {
        self.use_field_names = use_field_names;
        self
    }

    /// Sets the date pattern, in `time` format-description syntax.
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.date_format = pattern.into();
        self
    }

    /// Enables pretty printing with the given indentation unit.
    pub fn pretty_printing(mut self, indentation: impl Into<String>) -> Self {
        self.indentation = Some(indentation.into());
        self
    }

    /// Switches back to compact output.
    pub fn disable_pretty_printing(mut self) -> Self {
        self.indentation = None;
        self
    }

    /// Sets the maximum nesting depth accepted in either direction.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Registers `adapter` for its target type, replacing any previous
    /// adapter for that type (including the built-in ones).
    pub fn register_adapter<A: JsonAdapter>(mut self, adapter: A) -> Self {
        self.adapters.register(adapter);
        self
    }

    pub fn build(self) -> SerializationContext {
        SerializationContext {
            serialize_nulls: self.serialize_nulls,
            use_field_names: self.use_field_names,
            date_format: Arc::from(self.date_format),
            indentation: self.indentation.map(Arc::from),
            max_depth: self.max_depth,
            adapters: Arc::new(self.adapters),
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::any::TypeId;
    use time::OffsetDateTime;
    use url::Url;
    use uuid::Uuid;

    #[test]
    fn builtin_adapters_are_preregistered() {
        let context = SerializationContext::default();
        assert!(context.adapter(TypeId::of::<OffsetDateTime>()).is_some());
        assert!(context.adapter(TypeId::of::<Uuid>()).is_some());
        assert!(context.adapter(TypeId::of::<Url>()).is_some());
        assert!(context.adapter(TypeId::of::<String>()).is_none());
    }

    #[test]
    fn date_format_override_shares_the_registry() {
        let context = SerializationContext::default();
        let derived = context.with_date_format("[year]");
        assert_eq!(derived.date_format(), "[year]");
        assert_eq!(context.date_format(), DEFAULT_DATE_FORMAT);
        assert!(derived.adapter(TypeId::of::<Uuid>()).is_some());
    }
}
