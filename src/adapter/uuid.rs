use uuid::Uuid;

use crate::api::{ConversionError, SerializationContext};
use crate::json::JsonValue;
use crate::registry::JsonAdapter;

// -----------------------------------------------------------------------------
// UuidAdapter

/// Converts [`Uuid`] to and from strings.
///
/// Output is the canonical hyphenated lowercase form. Input additionally
/// tolerates surrounding whitespace, one pair of surrounding quotes, braces,
/// stripped hyphens and any letter case; those normalizations are the only
/// leniency — anything else is a conversion error.
pub struct UuidAdapter;

fn normalize(text: &str) -> Result<Uuid, ()> {
    let mut text = text.trim();
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        text = &text[1..text.len() - 1];
    }
    if let Ok(parsed) = Uuid::try_parse(text) {
        return Ok(parsed);
    }
    // Drop braces and interior whitespace, then retry; `try_parse` already
    // accepts the hyphen-less and mixed-case forms.
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '{' && *c != '}')
        .collect();
    Uuid::try_parse(&cleaned).map_err(|_| ())
}

impl JsonAdapter for UuidAdapter {
    type Target = Uuid;

    fn serialize(
        &self,
        value: &Uuid,
        _context: &SerializationContext,
    ) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Str(value.hyphenated().to_string()))
    }

    fn deserialize(
        &self,
        value: &JsonValue,
        _context: &SerializationContext,
    ) -> Result<Uuid, ConversionError> {
        let text = value
            .as_str()
            .ok_or_else(|| ConversionError::custom("expected a UUID string"))?;
        normalize(text).map_err(|()| {
            ConversionError::custom(format!("invalid UUID `{text}`"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "67e55044-10b1-426f-9247-bb680e5fe0c8";

    fn deserialize(text: &str) -> Result<Uuid, ConversionError> {
        let context = SerializationContext::default();
        UuidAdapter.deserialize(&JsonValue::Str(text.to_owned()), &context)
    }

    #[test]
    fn canonical_output() {
        let context = SerializationContext::default();
        let id = Uuid::try_parse(CANONICAL).unwrap();
        let wire = UuidAdapter.serialize(&id, &context).unwrap();
        assert_eq!(wire, JsonValue::Str(CANONICAL.to_owned()));
    }

    #[test]
    fn tolerated_input_forms() {
        let expected = Uuid::try_parse(CANONICAL).unwrap();
        assert_eq!(deserialize(CANONICAL).unwrap(), expected);
        assert_eq!(
            deserialize("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap(),
            expected
        );
        assert_eq!(
            deserialize("{67e55044-10b1-426f-9247-bb680e5fe0c8}").unwrap(),
            expected
        );
        assert_eq!(
            deserialize("67e5504410b1426f9247bb680e5fe0c8").unwrap(),
            expected
        );
        assert_eq!(deserialize("  67e55044-10b1-426f-9247-bb680e5fe0c8  ").unwrap(), expected);
        assert_eq!(deserialize("\"67e55044-10b1-426f-9247-bb680e5fe0c8\"").unwrap(), expected);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(deserialize("not-a-uuid").is_err());
        assert!(deserialize("67e55044").is_err());
    }
}
