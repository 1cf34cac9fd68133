use std::io::{Read, Write};

use crate::api::{DeserializeError, SerializationContext, SerializeError, TypeMismatchError};
use crate::info::Typed;
use crate::json::parse_with_depth;
use crate::{Reflect, de, ser};

// -----------------------------------------------------------------------------
// Serializer

/// The serialization front end: typed value in, JSON text out.
///
/// Cheap to create and to clone; all configuration lives in the
/// [`SerializationContext`].
///
/// # Examples
///
/// ```
/// use jsonbind::derive::Reflect;
/// use jsonbind::{SerializationContext, Serializer};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let serializer = Serializer::default();
/// let text = serializer.to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, r#"{"x":1,"y":2}"#);
///
/// let pretty = Serializer::new(
///     SerializationContext::builder().pretty_printing("  ").build(),
/// );
/// let text = pretty.to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(text, "{\n  \"x\": 1,\n  \"y\": 2\n}");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Serializer {
    context: SerializationContext,
}

impl Serializer {
    pub fn new(context: SerializationContext) -> Self {
        Self { context }
    }

    #[inline]
    pub fn context(&self) -> &SerializationContext {
        &self.context
    }

    /// Serializes `value` into a JSON string.
    pub fn to_string<T: Reflect>(&self, value: &T) -> Result<String, SerializeError> {
        let mut out = Vec::new();
        self.to_writer(value, &mut out)?;
        // The writer only ever emits UTF-8.
        Ok(String::from_utf8(out).expect("writer emits UTF-8"))
    }

    /// Serializes `value` as JSON text into `out`.
    pub fn to_writer<T: Reflect, W: Write>(
        &self,
        value: &T,
        out: W,
    ) -> Result<(), SerializeError> {
        ser::to_writer(value, out, &self.context)
    }

    /// The content type of the produced text.
    pub const fn content_type(&self) -> &'static str {
        crate::api::JSON_CONTENT_TYPE
    }
}

// -----------------------------------------------------------------------------
// Deserializer

/// The deserialization front end: JSON text in, typed value out.
///
/// Empty input, whitespace-only input and the literal `null` all yield
/// `Ok(None)`; every other outcome is either a fully converted value or a
/// [`DeserializeError`].
///
/// # Examples
///
/// ```
/// use jsonbind::Deserializer;
/// use jsonbind::derive::Reflect;
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let deserializer = Deserializer::default();
/// let point: Option<Point> = deserializer.from_str(r#"{"x":1,"y":2}"#).unwrap();
/// assert_eq!(point, Some(Point { x: 1, y: 2 }));
///
/// assert_eq!(deserializer.from_str::<Point>("null").unwrap(), None);
/// assert_eq!(deserializer.from_str::<Point>("  ").unwrap(), None);
/// assert!(deserializer.from_str::<Point>("{").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Deserializer {
    context: SerializationContext,
}

impl Deserializer {
    pub fn new(context: SerializationContext) -> Self {
        Self { context }
    }

    #[inline]
    pub fn context(&self) -> &SerializationContext {
        &self.context
    }

    /// Deserializes a value of type `T` from JSON text.
    pub fn from_str<T: Reflect + Typed>(&self, text: &str) -> Result<Option<T>, DeserializeError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        let value = parse_with_depth(text, self.context.max_depth())?;
        let boxed = de::deserialize_value(&value, <T as Typed>::type_info(), &self.context)
            .map_err(|e| e.with_context(|| format!("deserializing `{}`", type_path::<T>())))?;
        match boxed.take::<T>() {
            Ok(value) => Ok(Some(value)),
            // The driver builds exactly the requested type; this is a broken
            // manual Reflect/Typed implementation.
            Err(other) => Err(DeserializeError::from(TypeMismatchError::new(
                type_path::<T>(),
                other.type_info().type_path(),
            ))),
        }
    }

    /// Deserializes a value of type `T` from a reader.
    pub fn from_reader<T: Reflect + Typed, R: Read>(
        &self,
        mut source: R,
    ) -> Result<Option<T>, DeserializeError> {
        let mut text = String::new();
        source
            .read_to_string(&mut text)
            .map_err(DeserializeError::from)?;
        self.from_str(&text)
    }
}

fn type_path<T: Typed>() -> &'static str {
    T::type_info().type_path()
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use time::OffsetDateTime;
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;
    use crate::api::{ContextBuilder, ConversionError, ErrorCause, SerializationContext};
    use crate::derive::Reflect;
    use crate::json::JsonValue;
    use crate::registry::JsonAdapter;

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    struct Address {
        street: String,
        city: String,
    }

    #[derive(Reflect, Debug, PartialEq, Clone, Copy)]
    enum Color {
        Red,
        DarkGreen,
    }

    impl Default for Color {
        fn default() -> Self {
            Self::Red
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[allow(non_snake_case)]
    struct User {
        #[json(rename = "mail", alias = "email")]
        address: Option<String>,
        firstName: String,
        age: u32,
        color: Color,
        tags: Vec<String>,
        scores: IndexMap<String, i64>,
        home: Option<Address>,
    }

    fn sample_user() -> User {
        let mut scores = IndexMap::new();
        scores.insert("b".to_owned(), 1_i64);
        scores.insert("a".to_owned(), 2_i64);
        User {
            address: Some("ada@example.com".to_owned()),
            firstName: "Ada".to_owned(),
            age: 36,
            color: Color::DarkGreen,
            tags: vec!["x".to_owned(), "y".to_owned()],
            scores,
            home: Some(Address {
                street: "1 Main".to_owned(),
                city: "Springfield".to_owned(),
            }),
        }
    }

    #[test]
    fn round_trip_reconstructs_the_graph() {
        let _ = env_logger::builder().is_test(true).try_init();

        let user = sample_user();
        let text = Serializer::default().to_string(&user).unwrap();
        let back: User = Deserializer::default().from_str(&text).unwrap().unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn pretty_printing_layout() {
        #[derive(Reflect, Default)]
        struct Pair {
            a: i32,
            b: Vec<i32>,
        }

        let serializer = Serializer::new(
            SerializationContext::builder().pretty_printing("  ").build(),
        );
        let text = serializer
            .to_string(&Pair { a: 1, b: vec![2, 3] })
            .unwrap();
        assert_eq!(
            text,
            "{\n  \"a\": 1,\n  \"b\": [\n    2,\n    3\n  ]\n}"
        );
    }

    #[test]
    fn per_field_date_format_override() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Review {
            #[json(
                date_format = "[year]/[month]/[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]"
            )]
            day: Option<OffsetDateTime>,
            at: Option<OffsetDateTime>,
        }

        let review = Review {
            day: Some(datetime!(2026-08-06 07:15:00 +00:00)),
            at: Some(datetime!(2026-08-06 12:30:00.000 +00:00)),
        };
        let text = Serializer::default().to_string(&review).unwrap();
        assert_eq!(
            text,
            r#"{"day":"2026/08/06 07:15:00 +00:00","at":"2026-08-06T12:30:00.000+00:00"}"#
        );

        let back: Review = Deserializer::default().from_str(&text).unwrap().unwrap();
        assert_eq!(back, review);
    }

    #[test]
    fn field_order_and_naming_strategy() {
        let text = Serializer::default().to_string(&sample_user()).unwrap();
        assert!(text.starts_with(r#"{"mail":"ada@example.com","first_name":"Ada","age":36"#));

        // Declared-name mode keeps `firstName` as is.
        let serializer = Serializer::new(
            SerializationContext::builder().use_field_names(true).build(),
        );
        let text = serializer.to_string(&sample_user()).unwrap();
        assert!(text.contains(r#""firstName":"Ada""#));
        assert!(!text.contains("first_name"));
    }

    #[test]
    fn both_wire_names_deserialize() {
        let a: User = Deserializer::default()
            .from_str(r#"{"firstName":"Ada"}"#)
            .unwrap()
            .unwrap();
        let b: User = Deserializer::default()
            .from_str(r#"{"first_name":"Ada"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(a.firstName, "Ada");
        assert_eq!(b.firstName, "Ada");

        // The alias and the primary name land on the same field.
        let c: User = Deserializer::default()
            .from_str(r#"{"email":"x@y"}"#)
            .unwrap()
            .unwrap();
        let d: User = Deserializer::default()
            .from_str(r#"{"mail":"x@y"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(c.address.as_deref(), Some("x@y"));
        assert_eq!(d.address.as_deref(), Some("x@y"));
    }

    #[test]
    fn null_policy() {
        let user = User {
            address: None,
            ..User::default()
        };
        let compact = Serializer::default().to_string(&user).unwrap();
        assert!(!compact.contains("mail"));

        let serializer = Serializer::new(
            SerializationContext::builder().serialize_nulls(true).build(),
        );
        let text = serializer.to_string(&user).unwrap();
        assert!(text.contains(r#""mail":null"#));
        assert!(text.contains(r#""home":null"#));
    }

    #[test]
    fn key_order_is_preserved() {
        let text = r#"{"scores":{"b":1,"a":2}}"#;
        let user: User = Deserializer::default().from_str(text).unwrap().unwrap();
        let keys: Vec<_> = user.scores.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a"]);

        let out = Serializer::default().to_string(&user).unwrap();
        let b = out.find(r#""b":1"#).unwrap();
        let a = out.find(r#""a":2"#).unwrap();
        assert!(b < a);
    }

    #[test]
    fn enum_leniency() {
        let deserializer = Deserializer::default();
        let user: User = deserializer
            .from_str(r#"{"color":"darkgreen"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(user.color, Color::DarkGreen);

        let user: User = deserializer
            .from_str(r#"{"color":"\"Red\""}"#)
            .unwrap()
            .unwrap();
        assert_eq!(user.color, Color::Red);

        let err = deserializer
            .from_str::<User>(r#"{"color":"Mauve"}"#)
            .unwrap_err();
        assert!(matches!(
            err.cause(),
            ErrorCause::Conversion(ConversionError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn scalar_lifts_into_a_collection() {
        let user: User = Deserializer::default()
            .from_str(r#"{"tags":"solo"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(user.tags, ["solo"]);
    }

    #[test]
    fn unknown_members_are_ignored() {
        let user: User = Deserializer::default()
            .from_str(r#"{"stray":123,"age":7}"#)
            .unwrap()
            .unwrap();
        assert_eq!(user.age, 7);
    }

    #[test]
    fn skipped_fields_stay_off_the_wire() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Credentials {
            user: String,
            #[json(skip_serializing)]
            password: String,
            #[json(skip)]
            cached: u32,
        }

        let creds = Credentials {
            user: "root".to_owned(),
            password: "hunter2".to_owned(),
            cached: 9,
        };
        let text = Serializer::default().to_string(&creds).unwrap();
        assert_eq!(text, r#"{"user":"root"}"#);

        // skip_serializing still reads back in; skip never does.
        let back: Credentials = Deserializer::default()
            .from_str(r#"{"user":"a","password":"b","cached":4}"#)
            .unwrap()
            .unwrap();
        assert_eq!(back.password, "b");
        assert_eq!(back.cached, 0);
    }

    #[test]
    fn builtin_adapters_on_fields() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        struct Event {
            id: Option<Uuid>,
            at: Option<OffsetDateTime>,
        }

        let event = Event {
            id: Some(Uuid::try_parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap()),
            at: Some(datetime!(2026-08-06 12:00:00.500 +00:00)),
        };
        let text = Serializer::default().to_string(&event).unwrap();
        assert_eq!(
            text,
            r#"{"id":"67e55044-10b1-426f-9247-bb680e5fe0c8","at":"2026-08-06T12:00:00.500+00:00"}"#
        );

        let back: Event = Deserializer::default().from_str(&text).unwrap().unwrap();
        assert_eq!(back, event);

        // The tolerated UUID normalizations apply on the way in.
        let lenient: Event = Deserializer::default()
            .from_str(r#"{"id":"{67E5504410B1426F9247BB680E5FE0C8}"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(lenient.id, event.id);
    }

    #[test]
    fn custom_adapter_overrides_coercion() {
        struct CentsAdapter;

        impl JsonAdapter for CentsAdapter {
            type Target = f64;

            fn serialize(
                &self,
                value: &f64,
                _: &SerializationContext,
            ) -> Result<JsonValue, ConversionError> {
                Ok(JsonValue::Int((value * 100.0).round() as i64))
            }

            fn deserialize(
                &self,
                value: &JsonValue,
                _: &SerializationContext,
            ) -> Result<f64, ConversionError> {
                value
                    .as_i64()
                    .map(|cents| cents as f64 / 100.0)
                    .ok_or_else(|| ConversionError::custom("expected whole cents"))
            }
        }

        let context = ContextBuilder::new().register_adapter(CentsAdapter).build();
        let text = Serializer::new(context.clone()).to_string(&1.25_f64).unwrap();
        assert_eq!(text, "125");

        let back: f64 = Deserializer::new(context).from_str("125").unwrap().unwrap();
        assert_eq!(back, 1.25);
    }

    #[test]
    fn context_depth_limit_reaches_the_parser() {
        let deserializer = Deserializer::new(
            SerializationContext::builder().max_depth(2).build(),
        );
        let err = deserializer
            .from_str::<Vec<Vec<Vec<i32>>>>("[[[1]]]")
            .unwrap_err();
        assert!(matches!(err.cause(), ErrorCause::Syntax(_)));

        let ok: Vec<Vec<i32>> = deserializer.from_str("[[1]]").unwrap().unwrap();
        assert_eq!(ok, vec![vec![1]]);
    }

    #[test]
    fn reader_and_writer_endpoints() {
        let mut out = Vec::new();
        Serializer::default().to_writer(&5_i32, &mut out).unwrap();
        assert_eq!(out, b"5");

        let value: Option<i32> = Deserializer::default()
            .from_reader(&b"  42  "[..])
            .unwrap();
        assert_eq!(value, Some(42));
    }
}
