//! Derive macro for `jsonbind`: implements `Typed`, `Reflect` and the
//! matching kind trait (`Struct` or `Enum`), and builds the static field
//! tables the coercion engine runs on.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive_data;
mod impls;

static JSON_ATTRIBUTE_NAME: &str = "json";

/// # Reflection derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `Typed` — the static `TypeInfo` accessor, including the field table
///   with wire-name metadata and the construction hooks;
/// - `Reflect` — dynamic access for the conversion drivers;
/// - `Struct` (for `struct T { ... }`) or `Enum` (for an enum whose
///   variants all carry no data).
///
/// Tuple structs, unit structs, unions and data-carrying enum variants are
/// not reflectable and fail to compile.
///
/// Deriving on a struct expects a `Default` implementation, which is what
/// deserialization instantiates before assigning fields. Serialize-only
/// types can opt out with `#[json(no_default)]`; deserializing such a type
/// then reports a construction error at runtime.
///
/// ## Field attributes
///
/// ```ignore
/// #[derive(Reflect, Default)]
/// struct Account {
///     /// Explicit wire name; the naming strategy no longer applies.
///     #[json(rename = "account_id")]
///     id: u64,
///
///     /// Old wire names still accepted when deserializing.
///     #[json(alias = "mail", alias = "email_address")]
///     email: String,
///
///     /// Excluded from one direction, or from both with `skip`.
///     #[json(skip_serializing)]
///     password: String,
///     #[json(skip)]
///     session_token: Option<String>,
///
///     /// A field-specific date pattern.
///     #[json(date_format = "[year]-[month]-[day]")]
///     birthday: Option<time::OffsetDateTime>,
///
///     /// A field-specific adapter; the type must implement
///     /// `JsonAdapter + Default`.
///     #[json(adapter = CentsAdapter)]
///     balance: f64,
/// }
/// ```
///
/// ## Type attributes
///
/// - `#[json(no_default)]` — don't require `Default`; the type becomes
///   serialize-only.
/// - `#[json(from_str)]` — when a scalar arrives where this struct was
///   expected, try `FromStr` on the scalar's string form before the generic
///   construction fallback.
/// - `#[json(from_scalar = path::to::fn)]` — like `from_str` with a custom
///   hook; the function signature is
///   `fn(&JsonValue, &SerializationContext) -> Option<Self>`.
#[proc_macro_derive(Reflect, attributes(json))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_data::ReflectDerive::from_input(&input) {
        Ok(derive_data::ReflectDerive::Struct(data)) => impls::impl_struct(&data).into(),
        Ok(derive_data::ReflectDerive::Enum(data)) => impls::impl_enum(&data).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
