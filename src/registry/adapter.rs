use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::api::{ConversionError, SerializationContext};
use crate::info::Type;
use crate::json::JsonValue;

// -----------------------------------------------------------------------------
// JsonAdapter

/// A bidirectional converter for exactly one target type, overriding the
/// default coercion for that type.
///
/// Adapters are looked up by the target's exact [`TypeId`] — there is no
/// inheritance- or interface-based matching. Both directions receive the
/// read-only context, so stateful formatter objects are never needed; an
/// adapter that does keep internal mutable state must guard it itself.
///
/// # Examples
///
/// ```
/// use jsonbind::json::JsonValue;
/// use jsonbind::registry::JsonAdapter;
/// use jsonbind::api::{ConversionError, SerializationContext};
///
/// /// Transmits an amount as whole cents instead of a float.
/// #[derive(Default)]
/// struct CentsAdapter;
///
/// impl JsonAdapter for CentsAdapter {
///     type Target = f64;
///
///     fn serialize(
///         &self,
///         value: &f64,
///         _: &SerializationContext,
///     ) -> Result<JsonValue, ConversionError> {
///         Ok(JsonValue::Int((value * 100.0).round() as i64))
///     }
///
///     fn deserialize(
///         &self,
///         value: &JsonValue,
///         _: &SerializationContext,
///     ) -> Result<f64, ConversionError> {
///         match value.as_i64() {
///             Some(cents) => Ok(cents as f64 / 100.0),
///             None => Err(ConversionError::custom("expected whole cents")),
///         }
///     }
/// }
/// ```
pub trait JsonAdapter: Send + Sync + 'static {
    /// The type this adapter converts.
    type Target: Reflect;

    /// Converts a typed value into its wire form.
    fn serialize(
        &self,
        value: &Self::Target,
        context: &SerializationContext,
    ) -> Result<JsonValue, ConversionError>;

    /// Converts a wire value back into the typed form.
    fn deserialize(
        &self,
        value: &JsonValue,
        context: &SerializationContext,
    ) -> Result<Self::Target, ConversionError>;
}

// -----------------------------------------------------------------------------
// ErasedAdapter

type ErasedSerializeFn =
    Arc<dyn Fn(&dyn Reflect, &SerializationContext) -> Result<JsonValue, ConversionError> + Send + Sync>;
type ErasedDeserializeFn = Arc<
    dyn Fn(&JsonValue, &SerializationContext) -> Result<Box<dyn Reflect>, ConversionError>
        + Send
        + Sync,
>;

/// A [`JsonAdapter`] with its target type erased, as stored in the
/// [`AdapterRegistry`](crate::registry::AdapterRegistry) and in per-field
/// overrides.
#[derive(Clone)]
pub struct ErasedAdapter {
    target: Type,
    serialize: ErasedSerializeFn,
    deserialize: ErasedDeserializeFn,
}

impl ErasedAdapter {
    /// Erases a concrete adapter.
    pub fn new<A: JsonAdapter>(adapter: A) -> Self {
        let adapter = Arc::new(adapter);
        let ser = Arc::clone(&adapter);
        Self {
            target: Type::of::<A::Target>(),
            serialize: Arc::new(move |value, context| {
                let value = value.downcast_ref::<A::Target>().ok_or_else(|| {
                    ConversionError::custom(format!(
                        "adapter for {} applied to a different type",
                        Type::of::<A::Target>().path(),
                    ))
                })?;
                ser.serialize(value, context)
            }),
            deserialize: Arc::new(move |value, context| {
                adapter
                    .deserialize(value, context)
                    .map(|value| Box::new(value) as Box<dyn Reflect>)
            }),
        }
    }

    /// Returns the adapted type's identity.
    #[inline]
    pub const fn target(&self) -> &Type {
        &self.target
    }

    #[inline]
    pub const fn target_id(&self) -> TypeId {
        self.target.id()
    }

    pub(crate) fn serialize(
        &self,
        value: &dyn Reflect,
        context: &SerializationContext,
    ) -> Result<JsonValue, ConversionError> {
        (self.serialize)(value, context)
    }

    pub(crate) fn deserialize(
        &self,
        value: &JsonValue,
        context: &SerializationContext,
    ) -> Result<Box<dyn Reflect>, ConversionError> {
        (self.deserialize)(value, context)
    }
}

impl fmt::Debug for ErasedAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedAdapter")
            .field("target", &self.target.path())
            .finish()
    }
}
