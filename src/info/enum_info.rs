use crate::Reflect;
use crate::info::{Type, impl_type_fn};

// -----------------------------------------------------------------------------
// EnumInfo

/// The description of a unit-variant enum: its variant names in declaration
/// order, plus a constructor from a variant name.
///
/// Variants serialize as their symbolic name. Deserialization applies the
/// lenient matching chain implemented by the deserialize driver: exact
/// match, quote stripping, then a case-insensitive pass.
#[derive(Debug)]
pub struct EnumInfo {
    ty: Type,
    variants: &'static [&'static str],
    from_name: fn(&str) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    impl_type_fn!();

    /// Creates a new [`EnumInfo`].
    ///
    /// `from_name` must accept exactly the names in `variants`.
    pub fn new<T: 'static>(
        variants: &'static [&'static str],
        from_name: fn(&str) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants,
            from_name,
        }
    }

    /// Returns the variant names in declaration order.
    #[inline]
    pub const fn variant_names(&self) -> &'static [&'static str] {
        self.variants
    }

    /// Returns the number of variants.
    #[inline]
    pub const fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// Constructs the variant with exactly the given name.
    pub fn from_name(&self, name: &str) -> Option<Box<dyn Reflect>> {
        (self.from_name)(name)
    }
}
