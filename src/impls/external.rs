use time::OffsetDateTime;
use url::Url;
use uuid::Uuid;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, Typed};
use crate::reflection::impl_reflect_common;

// Opaque targets of the built-in adapters. Without an adapter registered in
// the context they cannot cross the wire at all, which the drivers report as
// a conversion error naming the type.

macro_rules! impl_opaque_reflect {
    ($ty:ty) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<$ty>()))
            }
        }

        impl Reflect for $ty {
            impl_reflect_common!(Opaque);
        }
    };
}

impl_opaque_reflect!(OffsetDateTime);
impl_opaque_reflect!(Uuid);
impl_opaque_reflect!(Url);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_types_are_plain_opaques() {
        assert!(<Uuid as Typed>::type_info().as_opaque().unwrap().scalar().is_none());
        assert!(
            <OffsetDateTime as Typed>::type_info()
                .as_opaque()
                .unwrap()
                .scalar()
                .is_none()
        );
    }
}
