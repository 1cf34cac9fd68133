//! Custom type adapters and the exact-match registry that stores them.

mod adapter;
mod registry;

pub use adapter::{ErasedAdapter, JsonAdapter};
pub use registry::AdapterRegistry;
