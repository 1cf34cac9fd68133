use std::collections::VecDeque;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_common;

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(|items| {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.take::<T>().ok()?);
                }
                Some(Box::new(out) as Box<dyn Reflect>)
            }))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    impl_reflect_common!(List);
}

impl<T: Reflect + Typed> List for Vec<T> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.as_slice().iter().map(|item| item as &dyn Reflect))
    }
}

// -----------------------------------------------------------------------------
// VecDeque

impl<T: Reflect + Typed> Typed for VecDeque<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(|items| {
                let mut out = VecDeque::with_capacity(items.len());
                for item in items {
                    out.push_back(item.take::<T>().ok()?);
                }
                Some(Box::new(out) as Box<dyn Reflect>)
            }))
        })
    }
}

impl<T: Reflect + Typed> Reflect for VecDeque<T> {
    impl_reflect_common!(List);
}

impl<T: Reflect + Typed> List for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        VecDeque::get(self, index).map(|item| item as &dyn Reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(VecDeque::iter(self).map(|item| item as &dyn Reflect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn vec_info_builds_from_items() {
        let info = <Vec<i32> as Typed>::type_info().as_list().unwrap();
        assert_eq!(info.item().kind(), ReflectKind::Opaque);

        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_i32), Box::new(2_i32)];
        let list = info.from_items(items).unwrap();
        assert_eq!(list.take::<Vec<i32>>().unwrap(), vec![1, 2]);

        // A mismatched item type is rejected.
        let items: Vec<Box<dyn Reflect>> = vec![Box::new(1_u8)];
        let info = <Vec<i32> as Typed>::type_info().as_list().unwrap();
        assert!(info.from_items(items).is_none());
    }

    #[test]
    fn list_access() {
        let values = vec!["a".to_owned(), "b".to_owned()];
        let list: &dyn List = &values;
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().downcast_ref::<String>().unwrap(), "b");
        assert!(list.get(2).is_none());

        let deque: VecDeque<i64> = VecDeque::from([7, 8]);
        let list: &dyn List = &deque;
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().downcast_ref::<i64>(), Some(&7));
    }
}
