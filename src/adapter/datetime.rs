use time::OffsetDateTime;
use time::format_description::{self, OwnedFormatItem};

use crate::api::{ConversionError, SerializationContext};
use crate::json::JsonValue;
use crate::registry::JsonAdapter;

// -----------------------------------------------------------------------------
// DateTimeAdapter

/// Converts [`OffsetDateTime`] to and from strings using the context's date
/// pattern.
///
/// The pattern is parsed on every call, so the adapter holds no state and
/// needs no locking; a field-level `#[json(date_format = ...)]` override
/// simply arrives as a different pattern in the context.
pub struct DateTimeAdapter;

fn pattern(context: &SerializationContext) -> Result<OwnedFormatItem, ConversionError> {
    format_description::parse_owned::<2>(context.date_format()).map_err(|e| {
        ConversionError::custom(format!(
            "invalid date pattern `{}`: {e}",
            context.date_format()
        ))
    })
}

impl JsonAdapter for DateTimeAdapter {
    type Target = OffsetDateTime;

    fn serialize(
        &self,
        value: &OffsetDateTime,
        context: &SerializationContext,
    ) -> Result<JsonValue, ConversionError> {
        let formatted = value
            .format(&pattern(context)?)
            .map_err(|e| ConversionError::custom(format!("cannot format date {value}: {e}")))?;
        Ok(JsonValue::Str(formatted))
    }

    fn deserialize(
        &self,
        value: &JsonValue,
        context: &SerializationContext,
    ) -> Result<OffsetDateTime, ConversionError> {
        let text = value
            .as_str()
            .ok_or_else(|| ConversionError::custom("expected a date string"))?;
        OffsetDateTime::parse(text, &pattern(context)?)
            .map_err(|e| ConversionError::custom(format!("cannot parse date `{text}`: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn formats_with_the_default_pattern() {
        let context = SerializationContext::default();
        let moment = datetime!(2026-08-06 17:45:30.123 +02:00);

        let wire = DateTimeAdapter.serialize(&moment, &context).unwrap();
        assert_eq!(
            wire,
            JsonValue::Str("2026-08-06T17:45:30.123+02:00".to_owned())
        );

        let back = DateTimeAdapter.deserialize(&wire, &context).unwrap();
        assert_eq!(back, moment);
    }

    #[test]
    fn respects_a_custom_pattern() {
        let context = SerializationContext::builder()
            .date_format("[year]/[month]/[day] [offset_hour sign:mandatory]")
            .build();
        let moment = datetime!(2026-08-06 00:00:00 +00:00);

        let wire = DateTimeAdapter.serialize(&moment, &context).unwrap();
        assert_eq!(wire, JsonValue::Str("2026/08/06 +00".to_owned()));
    }

    #[test]
    fn unparsable_input_is_an_error() {
        let context = SerializationContext::default();
        let err = DateTimeAdapter
            .deserialize(&JsonValue::Str("not a date".to_owned()), &context)
            .unwrap_err();
        assert!(err.to_string().contains("not a date"));

        assert!(
            DateTimeAdapter
                .deserialize(&JsonValue::Int(5), &context)
                .is_err()
        );
    }
}
