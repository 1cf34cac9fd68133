use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionInfo, TypeInfo, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_common;

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionInfo::new::<Self, T>(|inner| match inner {
                Some(boxed) => boxed
                    .take::<T>()
                    .ok()
                    .map(|value| Box::new(Some(value)) as Box<dyn Reflect>),
                None => Some(Box::new(None::<T>) as Box<dyn Reflect>),
            }))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_common!(Optional);
}

impl<T: Reflect + Typed> Optional for Option<T> {
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn option_info_wraps_inner() {
        let info = <Option<u32> as Typed>::type_info();
        assert_eq!(info.kind(), ReflectKind::Optional);

        let optional = info.as_optional().unwrap();
        assert_eq!(optional.inner().kind(), ReflectKind::Opaque);

        let some = optional.wrap(Some(Box::new(5_u32))).unwrap();
        assert_eq!(some.take::<Option<u32>>().unwrap(), Some(5));

        let none = optional.wrap(None).unwrap();
        assert_eq!(none.take::<Option<u32>>().unwrap(), None);

        // A mismatched inner type is rejected.
        assert!(optional.wrap(Some(Box::new("x".to_owned()))).is_none());
    }
}
