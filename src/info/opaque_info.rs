use crate::Reflect;
use crate::info::{Type, impl_type_fn};

// -----------------------------------------------------------------------------
// ScalarKind

/// The wire shape of a scalar opaque type, driving the coercion tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Char,
    Str,
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Metadata for types whose internals are opaque to the reflection system.
///
/// Scalar opaques (primitives, `String`, `char`) carry a [`ScalarKind`] and
/// are handled by the built-in coercion tables. Opaques without a scalar
/// kind — dates, UUIDs, URLs, user types — can only cross the wire through a
/// registered [`JsonAdapter`](crate::registry::JsonAdapter).
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    scalar: Option<ScalarKind>,
}

impl OpaqueInfo {
    impl_type_fn!();

    /// Creates an [`OpaqueInfo`] for a type with no built-in wire form.
    pub fn new<T: Reflect + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            scalar: None,
        }
    }

    /// Creates an [`OpaqueInfo`] for a built-in scalar type.
    pub fn new_scalar<T: Reflect>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            scalar: Some(kind),
        }
    }

    /// Returns the scalar kind, if this opaque has a built-in wire form.
    #[inline]
    pub const fn scalar(&self) -> Option<ScalarKind> {
        self.scalar
    }
}
