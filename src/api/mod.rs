//! The public conversion surface: the immutable context, the serializer and
//! deserializer front ends, and the error pair they raise.

mod context;
mod error;
mod serializer;

pub use context::{ContextBuilder, DEFAULT_DATE_FORMAT, JSON_CONTENT_TYPE, SerializationContext};
pub use error::{
    ConstructionError, ConversionError, DeserializeError, ErrorCause, SerializeError,
    TypeMismatchError,
};
pub use serializer::{Deserializer, Serializer};
