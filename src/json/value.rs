use indexmap::IndexMap;

// -----------------------------------------------------------------------------
// JsonValue

/// An insertion-ordered JSON object with unique string keys.
///
/// Inserting an existing key replaces the value but keeps the key's original
/// position.
pub type JsonObject = IndexMap<String, JsonValue>;

/// The in-memory form of a parsed JSON document.
///
/// Produced by [`parse`](crate::json::parse) and by
/// [`JsonAdapter`](crate::registry::JsonAdapter) implementations; consumed by
/// the deserialize driver and by [`JsonWriter`](crate::json::JsonWriter).
///
/// Numbers are split at parse time: a literal containing a decimal point or
/// an exponent becomes [`Float`](JsonValue::Float), anything else becomes
/// [`Int`](JsonValue::Int) unless it overflows an `i64`, in which case it
/// falls back to `Float`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<JsonValue>),
    Object(JsonObject),
}

impl JsonValue {
    /// A short noun describing this value's shape, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) | Self::Float(_) => "number",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`, widening integers.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            Self::Array(v) => Some(v),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    /// `true` for the scalar shapes a collection target may lift into a
    /// single-element collection: boolean, number or string.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_)
        )
    }

    /// The textual form of a scalar value, used for string/char coercion and
    /// for stringified map keys. `None` for null, arrays and objects.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Bool(v) => Some(v.to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) => Some(format_f64(*v)),
            Self::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

/// Formats a finite `f64` in its shortest round-trip decimal form.
///
/// The `{:?}` form always keeps a float marker (`3.0`, `1e100`), so the
/// emitted literal re-parses as a `Float` rather than an `Int`.
pub(crate) fn format_f64(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_preserves_insertion_order() {
        let mut object = JsonObject::new();
        object.insert("b".to_owned(), JsonValue::Int(1));
        object.insert("a".to_owned(), JsonValue::Int(2));
        object.insert("b".to_owned(), JsonValue::Int(3));

        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(object["b"], JsonValue::Int(3));
    }

    #[test]
    fn float_text_keeps_marker() {
        assert_eq!(format_f64(3.0), "3.0");
        assert_eq!(format_f64(-0.25), "-0.25");
        assert_eq!(JsonValue::Float(5.0).to_text().unwrap(), "5.0");
    }

    #[test]
    fn scalar_classification() {
        assert!(JsonValue::Int(1).is_scalar());
        assert!(JsonValue::Str(String::new()).is_scalar());
        assert!(!JsonValue::Null.is_scalar());
        assert!(!JsonValue::Array(vec![]).is_scalar());
    }
}
