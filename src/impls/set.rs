use core::hash::Hash;
use std::collections::{BTreeSet, HashSet};

use indexmap::IndexSet;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed};
use crate::ops::Set;
use crate::reflection::impl_reflect_common;

macro_rules! impl_set_reflect {
    ($set:ident, $($bound:path),+) => {
        impl<T> Typed for $set<T>
        where
            T: Reflect + Typed $(+ $bound)+,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    // Duplicate items collapse on insert, in source order.
                    TypeInfo::Set(ListInfo::new::<Self, T>(|items| {
                        let mut out = $set::new();
                        for item in items {
                            out.insert(item.take::<T>().ok()?);
                        }
                        Some(Box::new(out) as Box<dyn Reflect>)
                    }))
                })
            }
        }

        impl<T> Reflect for $set<T>
        where
            T: Reflect + Typed $(+ $bound)+,
        {
            impl_reflect_common!(Set);
        }

        impl<T> Set for $set<T>
        where
            T: Reflect + Typed $(+ $bound)+,
        {
            fn len(&self) -> usize {
                $set::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new($set::iter(self).map(|item| item as &dyn Reflect))
            }
        }
    };
}

impl_set_reflect!(HashSet, Eq, Hash);
impl_set_reflect!(BTreeSet, Ord);
impl_set_reflect!(IndexSet, Eq, Hash);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_info_deduplicates_in_source_order() {
        let info = <IndexSet<String> as Typed>::type_info().as_set().unwrap();
        let items: Vec<Box<dyn Reflect>> = vec![
            Box::new("b".to_owned()),
            Box::new("a".to_owned()),
            Box::new("b".to_owned()),
        ];
        let set = info.from_items(items).unwrap();
        let set = set.take::<IndexSet<String>>().unwrap();
        let items: Vec<_> = set.iter().map(String::as_str).collect();
        assert_eq!(items, ["b", "a"]);
    }
}
