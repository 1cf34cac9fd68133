use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed, impl_type_fn};

/// Wraps a converted inner value (or nothing) into the concrete `Option`.
/// `None` reports an inner value of the wrong type.
pub type WrapOptionFn = fn(Option<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// OptionInfo

/// The description of an `Option<T>`: the declared-nullable shape.
///
/// JSON `null` deserializes to `None`; any other value converts as the inner
/// type and wraps into `Some`. On serialization `None` becomes `null`, or the
/// member is dropped entirely where the null-skipping policy applies.
#[derive(Debug)]
pub struct OptionInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    wrap: WrapOptionFn,
}

impl OptionInfo {
    impl_type_fn!();

    /// Creates a new [`OptionInfo`] for `T = Option<I>`.
    pub fn new<T: 'static, I: Typed>(wrap: WrapOptionFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            inner: I::type_info,
            wrap,
        }
    }

    /// Returns the inner type's [`TypeInfo`].
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    pub(crate) fn wrap(&self, inner: Option<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.wrap)(inner)
    }
}
