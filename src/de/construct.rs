use log::trace;

use crate::Reflect;
use crate::api::{ConstructionError, ConversionError, DeserializeError, SerializationContext};
use crate::de::driver::{assign_field, deserialize_value};
use crate::info::StructInfo;
use crate::json::JsonValue;

/// Field names probed by the last-resort construction strategy, in the
/// order they are preferred within a single field.
const GUESSED_NAMES: [&str; 3] = ["value", "id", "name"];

/// Builds a struct from a scalar JSON value by trying an ordered list of
/// construction strategies:
///
/// 1. the type's own conversion hook, declared with `#[json(from_str)]` or
///    `#[json(from_scalar = ...)]`;
/// 2. default-construct, then assign the converted scalar into the first
///    field (in declaration order) named `value`, `id` or `name`,
///    case-insensitively.
///
/// The second strategy is a heuristic kept for wire compatibility: when
/// several candidate fields exist, declaration order decides, which is
/// deterministic but not necessarily the intended field.
pub(crate) fn from_scalar(
    value: &JsonValue,
    info: &'static StructInfo,
    context: &SerializationContext,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    if let Some(hook) = info.from_scalar()
        && let Some(instance) = hook(value, context)
    {
        return Ok(instance);
    }

    let Some(field) = info
        .iter()
        .find(|field| GUESSED_NAMES.iter().any(|g| field.name().eq_ignore_ascii_case(g)))
    else {
        return Err(ConversionError::ScalarToStruct {
            target: info.type_path(),
        }
        .into());
    };

    let Some(make_default) = info.make_default() else {
        return Err(ConstructionError::NoDefault {
            target: info.type_path(),
        }
        .into());
    };

    trace!(
        "building `{}` from a scalar through field `{}`",
        info.type_path(),
        field.name()
    );
    let child = deserialize_value(value, field.type_info(), context).map_err(|e| {
        e.with_context(|| format!("field `{}` of `{}`", field.name(), info.type_path()))
    })?;
    let mut instance = make_default();
    assign_field(instance.as_mut(), info, field.name(), child)?;
    Ok(instance)
}
