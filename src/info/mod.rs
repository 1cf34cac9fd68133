//! Static type information: what the coercion engine knows about a target
//! type before it sees any value.
//!
//! Every reflected type exposes a `&'static` [`TypeInfo`] through the
//! [`Typed`] trait, built once in a lazily-initialized cell. Composite infos
//! carry plain function pointers for construction (default-construct,
//! collect-from-items, wrap-option), so deserialization never needs runtime
//! type probing.

mod array_info;
mod enum_info;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod struct_info;
mod type_info;
mod typed;

pub use array_info::ArrayInfo;
pub use enum_info::EnumInfo;
pub use field_info::{FieldInfo, camel_to_snake};
pub use list_info::{FromItemsFn, ListInfo};
pub use map_info::{FromPairsFn, MapInfo};
pub use opaque_info::{OpaqueInfo, ScalarKind};
pub use option_info::{OptionInfo, WrapOptionFn};
pub use struct_info::{FromScalarFn, StructInfo};
pub use type_info::TypeInfo;
pub use typed::Typed;

use core::any::TypeId;
use core::{error, fmt};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to one access trait in [`crate::ops`] and one
/// variant of [`TypeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    Enum,
    List,
    Array,
    Set,
    Map,
    Optional,
    Opaque,
}

impl ReflectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Struct => "Struct",
            Self::Enum => "Enum",
            Self::List => "List",
            Self::Array => "Array",
            Self::Set => "Set",
            Self::Map => "Map",
            Self::Optional => "Optional",
            Self::Opaque => "Opaque",
        }
    }
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error returned when a value or `TypeInfo` is not the expected kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for KindError {}

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] plus its path, kept together so
/// error messages can name the type they failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full path, e.g. `alloc::string::String`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The unqualified name, e.g. `String`.
    pub fn name(&self) -> &'static str {
        let path = match self.path.split_once('<') {
            Some((head, _)) => head,
            None => self.path,
        };
        path.rsplit("::").next().unwrap_or(path)
    }
}

/// Implements `ty`/`id`/`type_path` accessors for an info struct holding a
/// `ty: Type` field.
macro_rules! impl_type_fn {
    () => {
        #[inline]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.ty
        }

        #[inline]
        pub const fn id(&self) -> ::core::any::TypeId {
            self.ty.id()
        }

        #[inline]
        pub const fn type_path(&self) -> &'static str {
            self.ty.path()
        }
    };
}

pub(crate) use impl_type_fn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_strips_path_and_generics() {
        assert_eq!(Type::of::<String>().name(), "String");
        assert_eq!(Type::of::<Vec<u8>>().name(), "Vec");
        assert_eq!(Type::of::<u8>().name(), "u8");
    }
}
