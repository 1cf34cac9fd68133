//! Kind-specific access traits and the `ReflectRef`/`ReflectMut` casts that
//! reach them from a `dyn Reflect`.

mod enum_ops;
mod list_ops;
mod map_ops;
mod option_ops;
mod set_ops;
mod struct_ops;

pub use enum_ops::Enum;
pub use list_ops::List;
pub use map_ops::Map;
pub use option_ops::Optional;
pub use set_ops::Set;
pub use struct_ops::Struct;

use crate::Reflect;
use crate::info::{KindError, ReflectKind};

// Helper macro that implements accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Casts to the kind-specific access trait, or reports which kind
        /// was found instead.
        pub fn $name(self) -> Result<$ty, KindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(KindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of a reflected value by [kind](ReflectKind).
///
/// Obtained via [`Reflect::reflect_ref`]; the serialize driver dispatches on
/// it.
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Enum(&'a dyn Enum),
    List(&'a dyn List),
    Array(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_enum: Enum => &'a dyn Enum);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_array: Array => &'a dyn List);
    impl_cast_method!(as_set: Set => &'a dyn Set);
    impl_cast_method!(as_map: Map => &'a dyn Map);
    impl_cast_method!(as_optional: Optional => &'a dyn Optional);

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Enum(_) => ReflectKind::Enum,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of a reflected value by [kind](ReflectKind).
///
/// Obtained via [`Reflect::reflect_mut`]; the deserialize driver uses the
/// [`Struct`] variant to assign converted field values.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Enum(&'a mut dyn Enum),
    List(&'a mut dyn List),
    Array(&'a mut dyn List),
    Set(&'a mut dyn Set),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    impl_cast_method!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_method!(as_enum: Enum => &'a mut dyn Enum);
    impl_cast_method!(as_list: List => &'a mut dyn List);
    impl_cast_method!(as_array: Array => &'a mut dyn List);
    impl_cast_method!(as_set: Set => &'a mut dyn Set);
    impl_cast_method!(as_map: Map => &'a mut dyn Map);
    impl_cast_method!(as_optional: Optional => &'a mut dyn Optional);

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Enum(_) => ReflectKind::Enum,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
