use core::{error, fmt};
use std::io;

use crate::info::KindError;
use crate::json::SyntaxError;

// -----------------------------------------------------------------------------
// TypeMismatchError

/// The value's shape is incompatible with the requested target shape, e.g.
/// a JSON object where an array was required.
#[derive(Debug)]
pub struct TypeMismatchError {
    expected: &'static str,
    found: &'static str,
}

impl TypeMismatchError {
    pub fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }

    #[inline]
    pub const fn expected(&self) -> &'static str {
        self.expected
    }

    #[inline]
    pub const fn found(&self) -> &'static str {
        self.found
    }
}

impl fmt::Display for TypeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, self.found)
    }
}

impl error::Error for TypeMismatchError {}

impl From<KindError> for TypeMismatchError {
    fn from(value: KindError) -> Self {
        Self {
            expected: value.expected.as_str(),
            found: value.received.as_str(),
        }
    }
}

// -----------------------------------------------------------------------------
// ConversionError

/// A value of compatible shape could not be coerced to the target's concrete
/// type.
#[derive(Debug)]
pub enum ConversionError {
    /// A string that does not parse as the target numeric type.
    InvalidNumber {
        literal: String,
        target: &'static str,
    },
    /// A string that is neither `true` nor `false` for a boolean target.
    InvalidBool { literal: String },
    /// An empty textual form for a `char` target.
    InvalidChar { literal: String },
    /// No enum constant matched, even after the lenient retries.
    UnknownVariant {
        literal: String,
        target: &'static str,
    },
    /// `NaN` or an infinity, which JSON cannot represent.
    NonFiniteFloat { value: f64 },
    /// An opaque type with no registered adapter.
    NoAdapter { target: &'static str },
    /// No construction strategy could build the target from a scalar.
    ScalarToStruct { target: &'static str },
    /// The value graph nests deeper than the configured maximum.
    DepthLimit { limit: usize },
    /// An adapter-supplied failure.
    Message(String),
}

impl ConversionError {
    /// Wraps an arbitrary failure, typically from a
    /// [`JsonAdapter`](crate::registry::JsonAdapter) implementation.
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Message(message.to_string())
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { literal, target } => {
                write!(f, "cannot convert `{literal}` to {target}")
            }
            Self::InvalidBool { literal } => {
                write!(f, "cannot convert `{literal}` to a boolean")
            }
            Self::InvalidChar { literal } => {
                write!(f, "cannot convert `{literal}` to a character")
            }
            Self::UnknownVariant { literal, target } => {
                write!(f, "no variant of {target} matches `{literal}`")
            }
            Self::NonFiniteFloat { value } => {
                write!(f, "{value} has no JSON representation")
            }
            Self::NoAdapter { target } => {
                write!(f, "no adapter registered for opaque type {target}")
            }
            Self::ScalarToStruct { target } => {
                write!(
                    f,
                    "cannot build {target} from a scalar: no conversion hook and no \
                     `value`/`id`/`name` field"
                )
            }
            Self::DepthLimit { limit } => {
                write!(f, "value nests deeper than the maximum depth of {limit}")
            }
            Self::Message(message) => f.write_str(message),
        }
    }
}

impl error::Error for ConversionError {}

// -----------------------------------------------------------------------------
// ConstructionError

/// The target type could not be instantiated, or a field could not be
/// assigned.
#[derive(Debug)]
pub enum ConstructionError {
    /// The struct has no default-construction hook (`#[json(no_default)]`).
    NoDefault { target: &'static str },
    /// A converted value could not be assigned into a field.
    FieldAssign {
        target: &'static str,
        field: &'static str,
    },
    /// A collection constructor received an element of the wrong type.
    ElementType { target: &'static str },
    /// A fixed-size array received the wrong number of elements.
    WrongLength {
        target: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDefault { target } => {
                write!(f, "cannot create an instance of {target}: no default")
            }
            Self::FieldAssign { target, field } => {
                write!(f, "cannot assign field `{field}` of {target}")
            }
            Self::ElementType { target } => {
                write!(f, "element of the wrong type while building {target}")
            }
            Self::WrongLength {
                target,
                expected,
                actual,
            } => {
                write!(f, "{target} expects {expected} elements, got {actual}")
            }
        }
    }
}

impl error::Error for ConstructionError {}

// -----------------------------------------------------------------------------
// ErrorCause

/// The specific underlying error wrapped by [`SerializeError`] and
/// [`DeserializeError`].
#[derive(Debug)]
pub enum ErrorCause {
    Syntax(SyntaxError),
    Mismatch(TypeMismatchError),
    Conversion(ConversionError),
    Construction(ConstructionError),
    Io(io::Error),
}

impl ErrorCause {
    fn as_error(&self) -> &(dyn error::Error + 'static) {
        match self {
            Self::Syntax(e) => e,
            Self::Mismatch(e) => e,
            Self::Conversion(e) => e,
            Self::Construction(e) => e,
            Self::Io(e) => e,
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_error(), f)
    }
}

macro_rules! impl_cause_from {
    ($variant:ident : $err:ty) => {
        impl From<$err> for ErrorCause {
            fn from(value: $err) -> Self {
                Self::$variant(value)
            }
        }

        impl From<$err> for SerializeError {
            fn from(value: $err) -> Self {
                Self::new(value)
            }
        }

        impl From<$err> for DeserializeError {
            fn from(value: $err) -> Self {
                Self::new(value)
            }
        }
    };
}

impl_cause_from!(Syntax: SyntaxError);
impl_cause_from!(Mismatch: TypeMismatchError);
impl_cause_from!(Conversion: ConversionError);
impl_cause_from!(Construction: ConstructionError);
impl_cause_from!(Io: io::Error);

// -----------------------------------------------------------------------------
// Public error pair

macro_rules! impl_public_error {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        ///
        /// Wraps the specific underlying error as its [`cause`](Self::cause)
        /// (also reachable through [`Error::source`](error::Error::source))
        /// and, where known, names the offending type or field.
        #[derive(Debug)]
        pub struct $name {
            context: Option<String>,
            cause: ErrorCause,
        }

        impl $name {
            pub(crate) fn new(cause: impl Into<ErrorCause>) -> Self {
                Self {
                    context: None,
                    cause: cause.into(),
                }
            }

            /// Returns the wrapped underlying error.
            #[inline]
            pub const fn cause(&self) -> &ErrorCause {
                &self.cause
            }

            /// Attaches the offending type/field description, keeping the
            /// innermost (most specific) one on nested failures.
            pub(crate) fn with_context(mut self, context: impl FnOnce() -> String) -> Self {
                if self.context.is_none() {
                    self.context = Some(context());
                }
                self
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match &self.context {
                    Some(context) => write!(f, "{context}: {}", self.cause),
                    None => fmt::Display::fmt(&self.cause, f),
                }
            }
        }

        impl error::Error for $name {
            fn source(&self) -> Option<&(dyn error::Error + 'static)> {
                Some(self.cause.as_error())
            }
        }
    };
}

impl_public_error!(
    SerializeError,
    "An error raised while serializing a typed value to JSON text."
);
impl_public_error!(
    DeserializeError,
    "An error raised while deserializing JSON text into a typed value."
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn wrapper_exposes_cause_and_context() {
        let err = DeserializeError::from(ConversionError::InvalidBool {
            literal: "yes".to_owned(),
        })
        .with_context(|| "field `active` of `User`".to_owned());

        assert_eq!(
            err.to_string(),
            "field `active` of `User`: cannot convert `yes` to a boolean"
        );
        assert!(matches!(err.cause(), ErrorCause::Conversion(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn innermost_context_wins() {
        let err = DeserializeError::from(ConversionError::custom("boom"))
            .with_context(|| "inner".to_owned())
            .with_context(|| "outer".to_owned());
        assert_eq!(err.to_string(), "inner: boom");
    }
}
