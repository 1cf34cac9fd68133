use core::any::TypeId;

use crate::info::{ArrayInfo, EnumInfo, ListInfo, MapInfo, OpaqueInfo, OptionInfo, StructInfo};
use crate::info::{KindError, ReflectKind, Type};

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for a reflected type.
///
/// A `TypeInfo` names the type's [kind](ReflectKind) and carries the
/// kind-specific description the coercion engine dispatches on: field tables
/// for structs, variant tables for enums, element/key/value types and
/// construction hooks for containers.
///
/// Obtained from [`Typed::type_info`](crate::info::Typed::type_info) when the
/// type is known at compile time, or from
/// [`Reflect::type_info`](crate::Reflect::type_info) on a `dyn Reflect`
/// value. Either way the reference is `&'static`: the info is built once per
/// type and reused for the lifetime of the program.
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    Enum(EnumInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Set(ListInfo),
    Map(MapInfo),
    Optional(OptionInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Converts [`TypeInfo`] to the kind-specific information,
        /// or reports which kind was found instead.
        pub const fn $name(&self) -> Result<&$info, KindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(KindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_set: Set => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`] identity.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::List(info) | Self::Set(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// A fast discriminator for dispatch.
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
