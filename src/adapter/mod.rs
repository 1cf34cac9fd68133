//! Built-in adapters, pre-registered by
//! [`ContextBuilder`](crate::ContextBuilder) and replaceable per type.

mod datetime;
mod url;
mod uuid;

pub use datetime::DateTimeAdapter;
pub use url::UrlAdapter;
pub use uuid::UuidAdapter;
