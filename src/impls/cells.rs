use core::any::TypeId;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// One-time storage for the [`TypeInfo`] of a non-generic type.
///
/// Declared as a `static` inside [`Typed::type_info`](crate::info::Typed) so
/// the info is built on first access and shared for the program's lifetime.
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get_or_init(&'static self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// One-time storage for the [`TypeInfo`]s of a generic type, one entry per
/// monomorphization.
///
/// Each entry is leaked on creation; the info is static data that lives for
/// the rest of the program anyway.
pub struct GenericTypeInfoCell(OnceLock<RwLock<HashMap<TypeId, &'static TypeInfo>>>);

impl GenericTypeInfoCell {
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get_or_insert<T: 'static>(
        &'static self,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        let table = self.0.get_or_init(Default::default);
        let id = TypeId::of::<T>();
        if let Some(info) = table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
        {
            return info;
        }
        *table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id)
            .or_insert_with(|| Box::leak(Box::new(f())))
    }
}
