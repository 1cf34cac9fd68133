//! The deserialize direction of the coercion engine: a parsed
//! [`JsonValue`](crate::json::JsonValue) tree is converted, guided by the
//! target's [`TypeInfo`](crate::info::TypeInfo), into a concrete typed
//! value.

mod coerce;
mod construct;
mod driver;

pub(crate) use driver::deserialize_value;
