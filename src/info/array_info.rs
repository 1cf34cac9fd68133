use crate::Reflect;
use crate::info::FromItemsFn;
use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

// -----------------------------------------------------------------------------
// ArrayInfo

/// The description of a fixed-size array `[I; N]`: item type, length, and a
/// constructor from exactly `N` converted items.
#[derive(Debug)]
pub struct ArrayInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    len: usize,
    from_items: FromItemsFn,
}

impl ArrayInfo {
    impl_type_fn!();

    /// Creates a new [`ArrayInfo`] for array `T` of `len` items of type `I`.
    pub fn new<T: 'static, I: Typed>(len: usize, from_items: FromItemsFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            item: I::type_info,
            len,
            from_items,
        }
    }

    /// Returns the item type's [`TypeInfo`].
    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Returns the fixed length of the array.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}
