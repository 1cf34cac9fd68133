use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for dynamic access to typed values.
///
/// A `dyn Reflect` is what the serialize driver walks and what the
/// deserialize driver builds: it exposes the value's static [`TypeInfo`] and
/// casts the value to the access trait matching its kind ([`Struct`],
/// [`Enum`], [`List`], [`Map`], ...).
///
/// It's strongly recommended to use [the derive macro](crate::derive::Reflect)
/// rather than implementing this trait by hand; the macro also implements
/// [`Typed`] and the kind trait matching the type's shape. Implementations
/// for primitives, standard collections and the built-in adapter targets
/// ship with the crate.
///
/// # Type identification
///
/// Note that [`Any::type_id`] on a `Box<dyn Reflect>` returns the
/// container's type id, not the inner value's. Use [`Reflect::ty_id`]:
///
/// ```
/// use core::any::TypeId;
/// use jsonbind::Reflect;
///
/// let boxed: Box<dyn Reflect> = Box::new(32_i32);
/// assert_eq!(boxed.ty_id(), TypeId::of::<i32>());
/// ```
///
/// [`Struct`]: crate::ops::Struct
/// [`Enum`]: crate::ops::Enum
/// [`List`]: crate::ops::List
/// [`Map`]: crate::ops::Map
/// [`Typed`]: crate::info::Typed
pub trait Reflect: Any + Send + Sync {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn type_info(&self) -> &'static TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Casts to the immutable access enum for this value's kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Casts to the mutable access enum for this value's kind.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Performs a type-checked assignment of a boxed value to this value.
    ///
    /// Returns the box unchanged when the types differ.
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        self.as_any().type_id()
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Downcasts the value to type `T`, unboxing and consuming the box.
    ///
    /// Returns the box unchanged if the underlying value is not a `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonbind::Reflect;
    ///
    /// let boxed: Box<dyn Reflect> = Box::new(10_i32);
    /// assert_eq!(boxed.take::<i32>().unwrap(), 10);
    /// ```
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        if self.is::<T>() {
            // The id was just checked, the downcast cannot fail.
            Ok(*self
                .into_any()
                .downcast::<T>()
                .expect("type id already checked"))
        } else {
            Err(self)
        }
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.type_info().type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the boilerplate `Reflect` methods for a concrete type whose
/// kind is `$kind`.
macro_rules! impl_reflect_common {
    ($kind:ident) => {
        fn type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline]
        fn as_any(&self) -> &dyn ::core::any::Any {
            self
        }

        #[inline]
        fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
            self
        }

        #[inline]
        fn into_any(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn ::core::any::Any> {
            self
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }

        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }
    };
}

pub(crate) use impl_reflect_common;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_checks_the_type() {
        let boxed: Box<dyn Reflect> = Box::new(10_u8);
        let boxed = boxed.take::<u16>().unwrap_err();
        assert_eq!(boxed.take::<u8>().unwrap(), 10);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut value = 1_i64;
        value.set(Box::new(5_i64)).unwrap();
        assert_eq!(value, 5);

        // A mismatched type leaves the target untouched.
        assert!(value.set(Box::new("x".to_owned())).is_err());
        assert_eq!(value, 5);
    }
}
