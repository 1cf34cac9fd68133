use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Builds a new map from converted `(key, value)` pairs in source order.
/// `None` reports a pair of the wrong type.
pub type FromPairsFn =
    fn(Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// MapInfo

/// The description of a map: declared key and value types plus a constructor
/// inserting converted pairs in source order.
///
/// On the wire a map is a JSON object; keys are stringified on output and
/// re-coerced from their string form on input.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    // `TypeInfo` is created on first access; function pointers delay it.
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    from_pairs: FromPairsFn,
}

impl MapInfo {
    impl_type_fn!();

    /// Creates a new [`MapInfo`] for map `T` with keys `K` and values `V`.
    pub fn new<T: 'static, K: Typed, V: Typed>(from_pairs: FromPairsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            key: K::type_info,
            value: V::type_info,
            from_pairs,
        }
    }

    /// Returns the key type's [`TypeInfo`].
    #[inline]
    pub fn key(&self) -> &'static TypeInfo {
        (self.key)()
    }

    /// Returns the value type's [`TypeInfo`].
    #[inline]
    pub fn value(&self) -> &'static TypeInfo {
        (self.value)()
    }

    pub(crate) fn from_pairs(
        &self,
        pairs: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
    ) -> Option<Box<dyn Reflect>> {
        (self.from_pairs)(pairs)
    }
}
