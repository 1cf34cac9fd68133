use std::io::Write;

use log::trace;

use crate::Reflect;
use crate::api::{ConversionError, SerializationContext, SerializeError, TypeMismatchError};
use crate::info::{ScalarKind, StructInfo};
use crate::json::{JsonWriter, format_f64};
use crate::ops::{Map, ReflectRef, Struct};

/// Serializes `value` as a complete JSON document into `out`.
pub(crate) fn to_writer<W: Write>(
    value: &dyn Reflect,
    out: W,
    context: &SerializationContext,
) -> Result<(), SerializeError> {
    let mut writer = JsonWriter::with_options(out, context.indentation());
    serialize_value(value, &mut writer, context, 0)
}

/// One step of the recursive serialize dispatch, in its fixed order: the
/// exact-type adapter first, then by kind.
fn serialize_value<W: Write>(
    value: &dyn Reflect,
    w: &mut JsonWriter<'_, W>,
    context: &SerializationContext,
    depth: usize,
) -> Result<(), SerializeError> {
    if depth > context.max_depth() {
        return Err(ConversionError::DepthLimit {
            limit: context.max_depth(),
        }
        .into());
    }

    if let Some(adapter) = context.adapter(value.ty_id()) {
        trace!("adapter override for `{}`", value.type_info().type_path());
        let tree = adapter.serialize(value, context).map_err(|e| {
            SerializeError::from(e)
                .with_context(|| format!("adapter for `{}`", value.type_info().type_path()))
        })?;
        return Ok(w.write_value(&tree)?);
    }

    match value.reflect_ref() {
        ReflectRef::Optional(optional) => match optional.value() {
            // `Option` adds no wire nesting, so the depth carries over.
            Some(inner) => serialize_value(inner, w, context, depth),
            None => Ok(w.write_null()?),
        },
        ReflectRef::Opaque(opaque) => serialize_opaque(opaque, w),
        ReflectRef::Enum(value) => Ok(w.write_string(value.variant_name())?),
        ReflectRef::List(list) | ReflectRef::Array(list) => {
            w.begin_array()?;
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    w.separator()?;
                }
                serialize_value(item, w, context, depth + 1)?;
            }
            Ok(w.end_array()?)
        }
        ReflectRef::Set(set) => {
            w.begin_array()?;
            for (i, item) in set.iter().enumerate() {
                if i > 0 {
                    w.separator()?;
                }
                serialize_value(item, w, context, depth + 1)?;
            }
            Ok(w.end_array()?)
        }
        ReflectRef::Map(map) => serialize_map(map, w, context, depth),
        ReflectRef::Struct(value) => serialize_struct(value, w, context, depth),
    }
}

fn serialize_opaque<W: Write>(
    value: &dyn Reflect,
    w: &mut JsonWriter<'_, W>,
) -> Result<(), SerializeError> {
    let info = value.type_info().as_opaque().map_err(TypeMismatchError::from)?;
    let Some(kind) = info.scalar() else {
        return Err(ConversionError::NoAdapter {
            target: info.type_path(),
        }
        .into());
    };

    // The info and the value were generated together; a failing downcast
    // would be a broken manual `Typed` implementation.
    macro_rules! cast {
        ($ty:ty) => {
            value.downcast_ref::<$ty>().ok_or_else(|| {
                TypeMismatchError::new(stringify!($ty), info.type_path())
            })?
        };
    }
    macro_rules! write_int {
        ($ty:ty) => {
            w.write_raw(&cast!($ty).to_string())?
        };
    }

    match kind {
        ScalarKind::Bool => w.write_raw(if *cast!(bool) { "true" } else { "false" })?,
        ScalarKind::I8 => write_int!(i8),
        ScalarKind::I16 => write_int!(i16),
        ScalarKind::I32 => write_int!(i32),
        ScalarKind::I64 => write_int!(i64),
        ScalarKind::Isize => write_int!(isize),
        ScalarKind::U8 => write_int!(u8),
        ScalarKind::U16 => write_int!(u16),
        ScalarKind::U32 => write_int!(u32),
        ScalarKind::U64 => write_int!(u64),
        ScalarKind::Usize => write_int!(usize),
        ScalarKind::F32 => {
            let v = *cast!(f32);
            if !v.is_finite() {
                return Err(ConversionError::NonFiniteFloat { value: v.into() }.into());
            }
            w.write_raw(&format!("{v:?}"))?;
        }
        ScalarKind::F64 => {
            let v = *cast!(f64);
            if !v.is_finite() {
                return Err(ConversionError::NonFiniteFloat { value: v }.into());
            }
            w.write_raw(&format_f64(v))?;
        }
        ScalarKind::Char => w.write_string(&cast!(char).to_string())?,
        ScalarKind::Str => w.write_string(cast!(String))?,
    }
    Ok(())
}

fn serialize_map<W: Write>(
    map: &dyn Map,
    w: &mut JsonWriter<'_, W>,
    context: &SerializationContext,
    depth: usize,
) -> Result<(), SerializeError> {
    w.begin_object()?;
    let mut first = true;
    for (key, value) in map.iter() {
        if (is_none(key) || is_none(value)) && !context.serialize_nulls() {
            continue;
        }
        let name = key_string(key, context)?;
        if !first {
            w.separator()?;
        }
        first = false;
        w.write_name(&name)?;
        serialize_value(value, w, context, depth + 1)?;
    }
    Ok(w.end_object()?)
}

/// Stringifies a map key: scalar text, an enum variant name, or the
/// adapter's wire form for adapted key types.
fn key_string(
    key: &dyn Reflect,
    context: &SerializationContext,
) -> Result<String, SerializeError> {
    if let Some(adapter) = context.adapter(key.ty_id()) {
        let tree = adapter.serialize(key, context)?;
        return tree.to_text().ok_or_else(|| {
            TypeMismatchError::new("a scalar map key", tree.kind_name()).into()
        });
    }
    match key.reflect_ref() {
        ReflectRef::Enum(key) => Ok(key.variant_name().to_owned()),
        ReflectRef::Optional(optional) => match optional.value() {
            Some(inner) => key_string(inner, context),
            None => Ok("null".to_owned()),
        },
        ReflectRef::Opaque(key) => {
            let info = key.type_info().as_opaque().map_err(TypeMismatchError::from)?;
            match info.scalar() {
                Some(kind) => scalar_key_text(key, kind),
                None => Err(ConversionError::NoAdapter {
                    target: info.type_path(),
                }
                .into()),
            }
        }
        other => Err(TypeMismatchError::new("a scalar map key", other.kind().as_str()).into()),
    }
}

fn scalar_key_text(key: &dyn Reflect, kind: ScalarKind) -> Result<String, SerializeError> {
    macro_rules! text {
        ($ty:ty) => {
            key.downcast_ref::<$ty>()
                .ok_or_else(|| TypeMismatchError::new(stringify!($ty), "a different key type"))?
                .to_string()
        };
    }
    Ok(match kind {
        ScalarKind::Bool => text!(bool),
        ScalarKind::I8 => text!(i8),
        ScalarKind::I16 => text!(i16),
        ScalarKind::I32 => text!(i32),
        ScalarKind::I64 => text!(i64),
        ScalarKind::Isize => text!(isize),
        ScalarKind::U8 => text!(u8),
        ScalarKind::U16 => text!(u16),
        ScalarKind::U32 => text!(u32),
        ScalarKind::U64 => text!(u64),
        ScalarKind::Usize => text!(usize),
        ScalarKind::F32 => {
            let v = *key
                .downcast_ref::<f32>()
                .ok_or_else(|| TypeMismatchError::new("f32", "a different key type"))?;
            format!("{v:?}")
        }
        ScalarKind::F64 => {
            let v = *key
                .downcast_ref::<f64>()
                .ok_or_else(|| TypeMismatchError::new("f64", "a different key type"))?;
            format_f64(v)
        }
        ScalarKind::Char => text!(char),
        ScalarKind::Str => text!(String),
    })
}

fn serialize_struct<W: Write>(
    value: &dyn Struct,
    w: &mut JsonWriter<'_, W>,
    context: &SerializationContext,
    depth: usize,
) -> Result<(), SerializeError> {
    let info: &StructInfo = value.type_info().as_struct().map_err(TypeMismatchError::from)?;

    w.begin_object()?;
    let mut first = true;
    for (index, field) in info.iter().enumerate() {
        if !field.serialize_enabled() {
            continue;
        }
        let Some(field_value) = value.field_at(index) else {
            // The field table and the Struct impl are generated together.
            continue;
        };

        let none = is_none(field_value);
        if none && !context.serialize_nulls() {
            continue;
        }

        if !first {
            w.separator()?;
        }
        first = false;
        w.write_name(&field.wire_name(context.use_field_names()))?;

        if none {
            w.write_null()?;
            continue;
        }

        let field_context;
        let context = match field.date_format() {
            Some(pattern) => {
                field_context = context.with_date_format(pattern);
                &field_context
            }
            None => context,
        };

        let result = match field.adapter() {
            Some(adapter) => adapter
                .serialize(unwrap_optional(field_value), context)
                .map_err(SerializeError::from)
                .and_then(|tree| Ok(w.write_value(&tree)?)),
            None => serialize_value(field_value, w, context, depth + 1),
        };
        result.map_err(|e| {
            e.with_context(|| format!("field `{}` of `{}`", field.name(), info.type_path()))
        })?;
    }
    Ok(w.end_object()?)
}

fn is_none(value: &dyn Reflect) -> bool {
    matches!(value.reflect_ref(), ReflectRef::Optional(optional) if optional.value().is_none())
}

/// Field adapters target the non-optional inner type; a present `Option`
/// unwraps before the adapter runs.
fn unwrap_optional(value: &dyn Reflect) -> &dyn Reflect {
    if let ReflectRef::Optional(optional) = value.reflect_ref()
        && let Some(inner) = optional.value()
    {
        inner
    } else {
        value
    }
}
