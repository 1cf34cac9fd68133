use url::Url;

use crate::api::{ConversionError, SerializationContext};
use crate::json::JsonValue;
use crate::registry::JsonAdapter;

// -----------------------------------------------------------------------------
// UrlAdapter

/// Converts [`Url`] to and from its string form.
pub struct UrlAdapter;

impl JsonAdapter for UrlAdapter {
    type Target = Url;

    fn serialize(
        &self,
        value: &Url,
        _context: &SerializationContext,
    ) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Str(value.as_str().to_owned()))
    }

    fn deserialize(
        &self,
        value: &JsonValue,
        _context: &SerializationContext,
    ) -> Result<Url, ConversionError> {
        let text = value
            .as_str()
            .ok_or_else(|| ConversionError::custom("expected a URL string"))?;
        Url::parse(text)
            .map_err(|e| ConversionError::custom(format!("invalid URL `{text}`: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_round_trip() {
        let context = SerializationContext::default();
        let url = Url::parse("https://example.com/a?b=c").unwrap();

        let wire = UrlAdapter.serialize(&url, &context).unwrap();
        assert_eq!(wire, JsonValue::Str("https://example.com/a?b=c".to_owned()));
        assert_eq!(UrlAdapter.deserialize(&wire, &context).unwrap(), url);

        let bad = JsonValue::Str("::nope::".to_owned());
        assert!(UrlAdapter.deserialize(&bad, &context).is_err());
    }
}
