use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ArrayInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_common;

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Array(ArrayInfo::new::<Self, T>(N, |items| {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.take::<T>().ok()?);
                }
                <[T; N]>::try_from(out)
                    .ok()
                    .map(|array| Box::new(array) as Box<dyn Reflect>)
            }))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    impl_reflect_common!(Array);
}

impl<T: Reflect + Typed, const N: usize> List for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.as_slice().iter().map(|item| item as &dyn Reflect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_info_checks_length() {
        let info = <[u8; 2] as Typed>::type_info().as_array().unwrap();
        assert_eq!(info.len(), 2);

        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u8), Box::new(2_u8)];
        let array = info.from_items(items).unwrap();
        assert_eq!(array.take::<[u8; 2]>().unwrap(), [1, 2]);

        let info = <[u8; 2] as Typed>::type_info().as_array().unwrap();
        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u8)];
        assert!(info.from_items(items).is_none());
    }
}
