use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;

use log::debug;

use crate::registry::{ErasedAdapter, JsonAdapter};

// -----------------------------------------------------------------------------
// AdapterRegistry

/// The per-context store of type adapters, keyed by the exact [`TypeId`] of
/// the adapted type.
///
/// Populated through
/// [`ContextBuilder::register_adapter`](crate::ContextBuilder::register_adapter)
/// and read-only once the context is built. Registering an adapter for a
/// type that already has one replaces it, which is how the built-in
/// date-time/UUID/URL adapters can be overridden.
#[derive(Default)]
pub struct AdapterRegistry {
    table: HashMap<TypeId, ErasedAdapter>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `adapter` for its target type.
    pub fn register<A: JsonAdapter>(&mut self, adapter: A) {
        self.insert(ErasedAdapter::new(adapter));
    }

    /// Registers an already-erased adapter.
    pub fn insert(&mut self, adapter: ErasedAdapter) {
        debug!("registering adapter for {}", adapter.target().path());
        self.table.insert(adapter.target_id(), adapter);
    }

    /// Looks up the adapter for exactly the given type.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ErasedAdapter> {
        self.table.get(&type_id)
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.table.contains_key(&type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.table.values().map(|adapter| adapter.target().path()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ConversionError, SerializationContext};
    use crate::json::JsonValue;

    struct UpperAdapter;

    impl JsonAdapter for UpperAdapter {
        type Target = String;

        fn serialize(
            &self,
            value: &String,
            _: &SerializationContext,
        ) -> Result<JsonValue, ConversionError> {
            Ok(JsonValue::Str(value.to_uppercase()))
        }

        fn deserialize(
            &self,
            value: &JsonValue,
            _: &SerializationContext,
        ) -> Result<String, ConversionError> {
            value
                .as_str()
                .map(str::to_lowercase)
                .ok_or_else(|| ConversionError::custom("expected a string"))
        }
    }

    #[test]
    fn lookup_is_exact() {
        let mut registry = AdapterRegistry::new();
        registry.register(UpperAdapter);

        assert!(registry.get(TypeId::of::<String>()).is_some());
        assert!(registry.get(TypeId::of::<&str>()).is_none());
        assert!(registry.get(TypeId::of::<u8>()).is_none());
    }

    #[test]
    fn erased_adapter_round_trips() {
        let context = SerializationContext::default();
        let adapter = ErasedAdapter::new(UpperAdapter);

        let wire = adapter.serialize(&"abc".to_owned(), &context).unwrap();
        assert_eq!(wire, JsonValue::Str("ABC".to_owned()));

        let back = adapter.deserialize(&wire, &context).unwrap();
        assert_eq!(back.take::<String>().unwrap(), "abc");

        // Applying the adapter to a non-target type is an error.
        assert!(adapter.serialize(&5_u8, &context).is_err());
    }
}
