use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, ScalarKind, TypeInfo, Typed};
use crate::reflection::impl_reflect_common;

macro_rules! impl_scalar_reflect {
    ($ty:ty, $kind:ident) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Opaque(OpaqueInfo::new_scalar::<$ty>(ScalarKind::$kind))
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_common!(Opaque);
        }
    };
}

impl_scalar_reflect!(bool, Bool);
impl_scalar_reflect!(i8, I8);
impl_scalar_reflect!(i16, I16);
impl_scalar_reflect!(i32, I32);
impl_scalar_reflect!(i64, I64);
impl_scalar_reflect!(isize, Isize);
impl_scalar_reflect!(u8, U8);
impl_scalar_reflect!(u16, U16);
impl_scalar_reflect!(u32, U32);
impl_scalar_reflect!(u64, U64);
impl_scalar_reflect!(usize, Usize);
impl_scalar_reflect!(f32, F32);
impl_scalar_reflect!(f64, F64);
impl_scalar_reflect!(char, Char);
impl_scalar_reflect!(String, Str);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn scalar_infos() {
        let info = <i32 as Typed>::type_info();
        assert_eq!(info.kind(), ReflectKind::Opaque);
        assert_eq!(info.as_opaque().unwrap().scalar(), Some(ScalarKind::I32));

        let info = <String as Typed>::type_info();
        assert_eq!(info.as_opaque().unwrap().scalar(), Some(ScalarKind::Str));
        assert!(info.as_struct().is_err());
    }

    #[test]
    fn infos_are_shared() {
        assert!(core::ptr::eq(<u8 as Typed>::type_info(), <u8 as Typed>::type_info()));
    }
}
