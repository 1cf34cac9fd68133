use crate::Reflect;
use crate::api::{ConversionError, DeserializeError, TypeMismatchError};
use crate::info::{OpaqueInfo, ScalarKind};
use crate::json::JsonValue;

// The scalar coercion tables. Numbers widen and narrow by truncation (`as`
// casts, no rounding); strings parse with locale-independent decimal rules
// and fail loudly on anything unparsable.

pub(crate) fn coerce_scalar(
    value: &JsonValue,
    kind: ScalarKind,
    info: &OpaqueInfo,
) -> Result<Box<dyn Reflect>, DeserializeError> {
    let target = info.type_path();

    macro_rules! int {
        ($ty:ty) => {
            Box::new(to_i64(value, target)? as $ty) as Box<dyn Reflect>
        };
    }

    Ok(match kind {
        ScalarKind::Bool => Box::new(to_bool(value, target)?),
        ScalarKind::I8 => int!(i8),
        ScalarKind::I16 => int!(i16),
        ScalarKind::I32 => int!(i32),
        ScalarKind::I64 => int!(i64),
        ScalarKind::Isize => int!(isize),
        ScalarKind::U8 => int!(u8),
        ScalarKind::U16 => int!(u16),
        ScalarKind::U32 => int!(u32),
        ScalarKind::U64 => int!(u64),
        ScalarKind::Usize => int!(usize),
        ScalarKind::F32 => Box::new(to_f64(value, target)? as f32),
        ScalarKind::F64 => Box::new(to_f64(value, target)?),
        ScalarKind::Char => {
            let text = to_text(value, target)?;
            let c = text.chars().next().ok_or(ConversionError::InvalidChar {
                literal: text.clone(),
            })?;
            Box::new(c)
        }
        ScalarKind::Str => Box::new(to_text(value, target)?),
    })
}

fn to_i64(value: &JsonValue, target: &'static str) -> Result<i64, DeserializeError> {
    match value {
        JsonValue::Int(v) => Ok(*v),
        // Truncation toward zero, never rounding.
        JsonValue::Float(v) => Ok(*v as i64),
        JsonValue::Str(s) => s.parse::<i64>().map_err(|_| {
            ConversionError::InvalidNumber {
                literal: s.clone(),
                target,
            }
            .into()
        }),
        other => Err(TypeMismatchError::new(target, other.kind_name()).into()),
    }
}

fn to_f64(value: &JsonValue, target: &'static str) -> Result<f64, DeserializeError> {
    match value {
        JsonValue::Int(v) => Ok(*v as f64),
        JsonValue::Float(v) => Ok(*v),
        JsonValue::Str(s) => s.parse::<f64>().map_err(|_| {
            ConversionError::InvalidNumber {
                literal: s.clone(),
                target,
            }
            .into()
        }),
        other => Err(TypeMismatchError::new(target, other.kind_name()).into()),
    }
}

fn to_bool(value: &JsonValue, target: &'static str) -> Result<bool, DeserializeError> {
    match value {
        JsonValue::Bool(v) => Ok(*v),
        JsonValue::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        JsonValue::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        JsonValue::Str(s) => Err(ConversionError::InvalidBool { literal: s.clone() }.into()),
        other => Err(TypeMismatchError::new(target, other.kind_name()).into()),
    }
}

fn to_text(value: &JsonValue, target: &'static str) -> Result<String, DeserializeError> {
    value
        .to_text()
        .ok_or_else(|| TypeMismatchError::new(target, value.kind_name()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::Typed;

    fn coerce<T: Typed>(value: &JsonValue) -> Result<Box<dyn Reflect>, DeserializeError> {
        let info = T::type_info().as_opaque().unwrap();
        coerce_scalar(value, info.scalar().unwrap(), info)
    }

    #[test]
    fn numbers_truncate_between_forms() {
        let v = coerce::<i32>(&JsonValue::Float(3.9)).unwrap();
        assert_eq!(v.take::<i32>().unwrap(), 3);

        let v = coerce::<i32>(&JsonValue::Float(-3.9)).unwrap();
        assert_eq!(v.take::<i32>().unwrap(), -3);

        let v = coerce::<f64>(&JsonValue::Int(5)).unwrap();
        assert_eq!(v.take::<f64>().unwrap(), 5.0);

        // Narrowing wraps like an `as` cast.
        let v = coerce::<u8>(&JsonValue::Int(257)).unwrap();
        assert_eq!(v.take::<u8>().unwrap(), 1);
    }

    #[test]
    fn strings_parse_strictly() {
        let v = coerce::<i64>(&JsonValue::Str("42".to_owned())).unwrap();
        assert_eq!(v.take::<i64>().unwrap(), 42);

        let v = coerce::<f32>(&JsonValue::Str("2.5".to_owned())).unwrap();
        assert_eq!(v.take::<f32>().unwrap(), 2.5);

        // A fractional literal does not parse as an integer.
        assert!(coerce::<i64>(&JsonValue::Str("3.5".to_owned())).is_err());
        assert!(coerce::<i64>(&JsonValue::Str("abc".to_owned())).is_err());
    }

    #[test]
    fn booleans_accept_only_true_and_false() {
        let v = coerce::<bool>(&JsonValue::Str("TRUE".to_owned())).unwrap();
        assert!(v.take::<bool>().unwrap());

        assert!(coerce::<bool>(&JsonValue::Str("yes".to_owned())).is_err());
        assert!(coerce::<bool>(&JsonValue::Int(1)).is_err());
    }

    #[test]
    fn textual_targets_use_the_textual_form() {
        let v = coerce::<String>(&JsonValue::Int(65)).unwrap();
        assert_eq!(v.take::<String>().unwrap(), "65");

        let v = coerce::<String>(&JsonValue::Bool(true)).unwrap();
        assert_eq!(v.take::<String>().unwrap(), "true");

        // The char target takes the first character of the textual form.
        let v = coerce::<char>(&JsonValue::Int(65)).unwrap();
        assert_eq!(v.take::<char>().unwrap(), '6');

        assert!(coerce::<char>(&JsonValue::Str(String::new())).is_err());
    }

    #[test]
    fn shape_mismatches_are_reported() {
        let err = coerce::<i64>(&JsonValue::Array(vec![])).unwrap_err();
        assert!(err.to_string().contains("found array"));
    }
}
