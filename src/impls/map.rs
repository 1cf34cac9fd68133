use core::hash::Hash;
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_common;

macro_rules! impl_map_reflect {
    ($map:ident, $($bound:path),+) => {
        impl<K, V> Typed for $map<K, V>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>(|pairs| {
                        let mut out = $map::new();
                        for (key, value) in pairs {
                            out.insert(key.take::<K>().ok()?, value.take::<V>().ok()?);
                        }
                        Some(Box::new(out) as Box<dyn Reflect>)
                    }))
                })
            }
        }

        impl<K, V> Reflect for $map<K, V>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
        {
            impl_reflect_common!(Map);
        }

        impl<K, V> Map for $map<K, V>
        where
            K: Reflect + Typed $(+ $bound)+,
            V: Reflect + Typed,
        {
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    $map::iter(self).map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                )
            }
        }
    };
}

impl_map_reflect!(HashMap, Eq, Hash);
impl_map_reflect!(BTreeMap, Ord);
impl_map_reflect!(IndexMap, Eq, Hash);
