use log::trace;

use crate::Reflect;
use crate::api::{ConstructionError, ConversionError, DeserializeError, SerializationContext};
use crate::api::TypeMismatchError;
use crate::de::{coerce, construct};
use crate::info::{ArrayInfo, EnumInfo, FieldInfo, ListInfo, MapInfo, StructInfo, TypeInfo};
use crate::json::{JsonObject, JsonValue};

/// One step of the recursive deserialize dispatch, in its fixed order:
/// null, then the exact-type adapter, then by target kind.
pub(crate) fn deserialize_value(
    value: &JsonValue,
    info: &'static TypeInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    if value.is_null() {
        if let TypeInfo::Optional(optional) = info {
            return optional
                .wrap(None)
                .ok_or_else(|| element_error(optional.type_path()));
        }
        return Err(TypeMismatchError::new(info.type_path(), "null").into());
    }

    if let Some(adapter) = context.adapter(info.id()) {
        return adapter.deserialize(value, context).map_err(|e| {
            DeserializeError::from(e)
                .with_context(|| format!("adapter for `{}`", info.type_path()))
        });
    }

    match info {
        TypeInfo::Optional(optional) => {
            let inner = deserialize_value(value, optional.inner(), context)?;
            optional
                .wrap(Some(inner))
                .ok_or_else(|| element_error(optional.type_path()))
        }
        TypeInfo::Opaque(opaque) => match opaque.scalar() {
            Some(kind) => coerce::coerce_scalar(value, kind, opaque),
            None => Err(ConversionError::NoAdapter {
                target: opaque.type_path(),
            }
            .into()),
        },
        TypeInfo::Enum(info) => deserialize_enum(value, info),
        TypeInfo::List(list) | TypeInfo::Set(list) => deserialize_list(value, list, context),
        TypeInfo::Array(array) => deserialize_array(value, array, context),
        TypeInfo::Map(map) => deserialize_map(value, map, context),
        TypeInfo::Struct(info) => deserialize_struct(value, info, context),
    }
}

/// The lenient variant-matching chain: exact name, then one pair of
/// surrounding quotes stripped, then a case-insensitive pass. These are the
/// only tolerated normalizations.
fn deserialize_enum(
    value: &JsonValue,
    info: &'static EnumInfo,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let Some(text) = value.to_text() else {
        return Err(TypeMismatchError::new(info.type_path(), value.kind_name()).into());
    };

    if let Some(variant) = info.from_name(&text) {
        return Ok(variant);
    }

    if text.len() >= 2
        && let Some(stripped) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"'))
        && let Some(variant) = info.from_name(stripped)
    {
        return Ok(variant);
    }

    for name in info.variant_names() {
        if name.eq_ignore_ascii_case(&text) {
            if let Some(variant) = info.from_name(name) {
                return Ok(variant);
            }
        }
    }

    Err(ConversionError::UnknownVariant {
        literal: text,
        target: info.type_path(),
    }
    .into())
}

fn deserialize_list(
    value: &JsonValue,
    info: &'static ListInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let items = match value {
        JsonValue::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item = deserialize_value(item, info.item(), context).map_err(|e| {
                    e.with_context(|| format!("element {index} of `{}`", info.type_path()))
                })?;
                out.push(item);
            }
            out
        }
        // A scalar lifts to a single-element collection instead of failing.
        scalar if scalar.is_scalar() => {
            trace!("lifting a scalar into `{}`", info.type_path());
            vec![deserialize_value(scalar, info.item(), context)?]
        }
        other => {
            return Err(TypeMismatchError::new(info.type_path(), other.kind_name()).into());
        }
    };

    info.from_items(items)
        .ok_or_else(|| element_error(info.type_path()))
}

fn deserialize_array(
    value: &JsonValue,
    info: &'static ArrayInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let source = match value {
        JsonValue::Array(items) => items.as_slice(),
        scalar if scalar.is_scalar() => core::slice::from_ref(value),
        other => {
            return Err(TypeMismatchError::new(info.type_path(), other.kind_name()).into());
        }
    };
    if source.len() != info.len() {
        return Err(ConstructionError::WrongLength {
            target: info.type_path(),
            expected: info.len(),
            actual: source.len(),
        }
        .into());
    }

    let mut items = Vec::with_capacity(source.len());
    for (index, item) in source.iter().enumerate() {
        let item = deserialize_value(item, info.item(), context).map_err(|e| {
            e.with_context(|| format!("element {index} of `{}`", info.type_path()))
        })?;
        items.push(item);
    }
    info.from_items(items)
        .ok_or_else(|| element_error(info.type_path()))
}

fn deserialize_map(
    value: &JsonValue,
    info: &'static MapInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let JsonValue::Object(entries) = value else {
        return Err(TypeMismatchError::new(info.type_path(), value.kind_name()).into());
    };

    let mut pairs = Vec::with_capacity(entries.len());
    for (name, entry) in entries {
        // Keys re-coerce from their string form to the declared key type.
        let key = deserialize_value(&JsonValue::Str(name.clone()), info.key(), context)
            .map_err(|e| e.with_context(|| format!("key `{name}` of `{}`", info.type_path())))?;
        let value = deserialize_value(entry, info.value(), context)
            .map_err(|e| e.with_context(|| format!("entry `{name}` of `{}`", info.type_path())))?;
        pairs.push((key, value));
    }
    info.from_pairs(pairs)
        .ok_or_else(|| element_error(info.type_path()))
}

fn deserialize_struct(
    value: &JsonValue,
    info: &'static StructInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    match value {
        JsonValue::Object(members) => deserialize_struct_members(members, info, context),
        scalar if scalar.is_scalar() => construct::from_scalar(scalar, info, context),
        other => Err(TypeMismatchError::new(info.type_path(), other.kind_name()).into()),
    }
}

fn deserialize_struct_members(
    members: &JsonObject,
    info: &'static StructInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let Some(make_default) = info.make_default() else {
        return Err(ConstructionError::NoDefault {
            target: info.type_path(),
        }
        .into());
    };
    let mut instance = make_default();

    for (name, entry) in members {
        let Some(field) = info.resolve(name, context.use_field_names()) else {
            trace!("ignoring unknown member `{name}` for `{}`", info.type_path());
            continue;
        };

        let child = convert_field(entry, field, context).map_err(|e| {
            e.with_context(|| format!("field `{}` of `{}`", field.name(), info.type_path()))
        })?;
        assign_field(instance.as_mut(), info, field.name(), child)?;
    }

    Ok(instance)
}

/// Converts one member value for a field, honoring the per-field adapter
/// and date-format overrides.
fn convert_field(
    entry: &JsonValue,
    field: &FieldInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let field_context;
    let context = match field.date_format() {
        Some(pattern) => {
            field_context = context.with_date_format(pattern);
            &field_context
        }
        None => context,
    };

    let field_info = field.type_info();
    let Some(adapter) = field.adapter() else {
        return deserialize_value(entry, field_info, context);
    };

    // The adapter targets the non-optional inner type; null still maps to
    // `None` for an optional field.
    if let TypeInfo::Optional(optional) = field_info {
        if entry.is_null() {
            return optional
                .wrap(None)
                .ok_or_else(|| element_error(optional.type_path()));
        }
        let inner = adapter.deserialize(entry, context)?;
        return optional
            .wrap(Some(inner))
            .ok_or_else(|| element_error(optional.type_path()));
    }
    adapter
        .deserialize(entry, context)
        .map_err(DeserializeError::from)
}

/// Assigns a converted value into a field of a default-constructed
/// instance.
pub(super) fn assign_field(
    instance: &mut dyn Reflect,
    info: &StructInfo,
    name: &'static str,
    value: Box<dyn Reflect>,
) -> Result<(), DeserializeError> {
    let fail = || ConstructionError::FieldAssign {
        target: info.type_path(),
        field: name,
    };
    let target = instance.reflect_mut().as_struct().map_err(|_| fail())?;
    target
        .field_mut(name)
        .ok_or_else(fail)?
        .set(value)
        .map_err(|_| fail())?;
    Ok(())
}

fn element_error(target: &'static str) -> DeserializeError {
    ConstructionError::ElementType { target }.into()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::api::ErrorCause;
    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::json::parse;

    fn convert<T: crate::Reflect + Typed>(text: &str) -> Result<T, DeserializeError> {
        let value = parse(text).expect("test input parses");
        let context = SerializationContext::default();
        deserialize_value(&value, <T as Typed>::type_info(), &context).map(|boxed| {
            boxed.take::<T>().expect("driver returns the requested type")
        })
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Label {
        id: u64,
        text: String,
    }

    #[test]
    fn scalar_builds_a_struct_through_the_field_guess() {
        // `id` is the first guessed field in declaration order.
        let label: Label = convert("7").unwrap();
        assert_eq!(label, Label { id: 7, text: String::new() });

        // The scalar goes through normal coercion on its way in.
        let label: Label = convert(r#""12""#).unwrap();
        assert_eq!(label.id, 12);
    }

    #[test]
    fn scalar_without_a_guessable_field_fails() {
        #[derive(Reflect, Default, Debug)]
        struct Opaque {
            payload: String,
        }

        let err = convert::<Opaque>("7").unwrap_err();
        assert!(matches!(
            err.cause(),
            ErrorCause::Conversion(ConversionError::ScalarToStruct { .. })
        ));
    }

    #[test]
    fn from_str_hook_runs_before_the_field_guess() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        #[json(from_str)]
        struct Version {
            major: u32,
            minor: u32,
        }

        impl core::str::FromStr for Version {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, ()> {
                let (major, minor) = s.split_once('.').ok_or(())?;
                Ok(Self {
                    major: major.parse().map_err(|_| ())?,
                    minor: minor.parse().map_err(|_| ())?,
                })
            }
        }

        let version: Version = convert(r#""1.9""#).unwrap();
        assert_eq!(version, Version { major: 1, minor: 9 });

        // A hook miss falls through to the next strategy, which also has
        // nothing to offer here.
        assert!(convert::<Version>(r#""nope""#).is_err());
    }

    #[test]
    fn from_scalar_hook_takes_the_raw_value() {
        fn from_code(
            value: &JsonValue,
            _context: &SerializationContext,
        ) -> Option<Flag> {
            value.as_i64().map(|code| Flag { set: code != 0 })
        }

        #[derive(Reflect, Default, Debug, PartialEq)]
        #[json(from_scalar = from_code)]
        struct Flag {
            set: bool,
        }

        let flag: Flag = convert("1").unwrap();
        assert!(flag.set);
    }

    #[test]
    fn no_default_structs_refuse_to_deserialize() {
        #[derive(Reflect, Debug)]
        #[json(no_default)]
        struct WriteOnly {
            token: String,
        }

        let err = convert::<WriteOnly>(r#"{"token":"x"}"#).unwrap_err();
        assert!(matches!(
            err.cause(),
            ErrorCause::Construction(ConstructionError::NoDefault { .. })
        ));
    }

    #[test]
    fn explicit_names_shadow_declared_names() {
        // `b` is an alias of `first`, and also the declared name of the
        // second field; the explicit table wins.
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Shadowed {
            #[json(alias = "b")]
            first: i32,
            b: i32,
        }

        let value: Shadowed = convert(r#"{"b":5}"#).unwrap();
        assert_eq!(value, Shadowed { first: 5, b: 0 });
    }

    #[test]
    fn later_members_overwrite_earlier_ones() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Renamed {
            #[json(rename = "new", alias = "old")]
            value: i32,
        }

        let value: Renamed = convert(r#"{"old":1,"new":2}"#).unwrap();
        assert_eq!(value.value, 2);
    }

    #[test]
    fn map_keys_recoerce_to_the_declared_key_type() {
        let map: BTreeMap<u8, bool> = convert(r#"{"2":true,"9":false}"#).unwrap();
        assert_eq!(map, BTreeMap::from([(2, true), (9, false)]));

        #[derive(Reflect, Debug, PartialEq, Eq, PartialOrd, Ord)]
        enum Axis {
            X,
            Y,
        }

        let map: BTreeMap<Axis, i32> = convert(r#"{"x":1,"Y":2}"#).unwrap();
        assert_eq!(map, BTreeMap::from([(Axis::X, 1), (Axis::Y, 2)]));
    }

    #[test]
    fn fixed_arrays_check_their_length() {
        let array: [i16; 3] = convert("[1,2,3]").unwrap();
        assert_eq!(array, [1, 2, 3]);

        let err = convert::<[i16; 3]>("[1,2]").unwrap_err();
        assert!(matches!(
            err.cause(),
            ErrorCause::Construction(ConstructionError::WrongLength { expected: 3, actual: 2, .. })
        ));

        // A scalar lifts only into a one-element array.
        let array: [i16; 1] = convert("9").unwrap();
        assert_eq!(array, [9]);
    }

    #[test]
    fn null_only_fits_optional_targets() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Holder {
            inner: Option<i32>,
            count: i32,
        }

        let holder: Holder = convert(r#"{"inner":null}"#).unwrap();
        assert_eq!(holder.inner, None);

        let err = convert::<Holder>(r#"{"count":null}"#).unwrap_err();
        assert!(matches!(err.cause(), ErrorCause::Mismatch(_)));
        assert!(err.to_string().contains("field `count`"));
    }

    #[test]
    fn shape_mismatches_name_the_offending_spot() {
        #[derive(Reflect, Default, Debug)]
        struct Wrapper {
            items: Vec<i32>,
        }

        let err = convert::<Wrapper>(r#"{"items":[1,"x",3]}"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("element 1"), "message: {message}");
    }
}
