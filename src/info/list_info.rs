use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Builds a new collection from converted elements, already boxed as the
/// declared item type. `None` reports an element of the wrong type, which
/// the driver surfaces as a construction error.
pub type FromItemsFn = fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// ListInfo

/// The description of a sequence or set collection: the declared item type
/// plus a constructor collecting converted items into a new instance.
///
/// Used for both [`TypeInfo::List`] and [`TypeInfo::Set`]; for sets the
/// constructor deduplicates by inserting in source order.
///
/// [`TypeInfo::List`]: crate::info::TypeInfo::List
/// [`TypeInfo::Set`]: crate::info::TypeInfo::Set
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    // `TypeInfo` is created on first access; a function pointer delays it.
    item: fn() -> &'static TypeInfo,
    from_items: FromItemsFn,
}

impl ListInfo {
    impl_type_fn!();

    /// Creates a new [`ListInfo`] for collection `T` with items of type `I`.
    pub fn new<T: 'static, I: Typed>(from_items: FromItemsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            item: I::type_info,
            from_items,
        }
    }

    /// Returns the item type's [`TypeInfo`].
    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    pub(crate) fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}
