use crate::Reflect;
use crate::api::SerializationContext;
use crate::info::{FieldInfo, Type, impl_type_fn};
use crate::json::JsonValue;

/// A hook that builds an instance straight from a scalar JSON value,
/// declared with `#[json(from_str)]` or `#[json(from_scalar = ...)]`.
/// `None` means the hook does not apply and the next construction strategy
/// is tried.
pub type FromScalarFn =
    fn(&JsonValue, &SerializationContext) -> Option<Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// StructInfo

/// The description of a struct: its ordered field table plus construction
/// hooks.
///
/// Field order is declaration order, which is also the member order on
/// serialized output.
///
/// # Examples
///
/// ```
/// use jsonbind::derive::Reflect;
/// use jsonbind::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Account {
///     id: u64,
///     owner: String,
/// }
///
/// let info = Account::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field_at(1).unwrap().name(), "owner");
/// assert_eq!(info.index_of("id"), Some(0));
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[FieldInfo]>,
    make_default: Option<fn() -> Box<dyn Reflect>>,
    from_scalar: Option<FromScalarFn>,
}

impl StructInfo {
    impl_type_fn!();

    /// Creates a new [`StructInfo`] with fields in declaration order.
    pub fn new<T: 'static>(fields: Vec<FieldInfo>) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
            make_default: None,
            from_scalar: None,
        }
    }

    /// Registers the default-construction hook used by deserialization.
    ///
    /// Without it, deserializing into this struct is a construction error.
    pub fn with_default(mut self, make_default: fn() -> Box<dyn Reflect>) -> Self {
        self.make_default = Some(make_default);
        self
    }

    /// Registers a scalar-construction hook, tried before the generic
    /// default-and-assign fallback.
    pub fn with_from_scalar(mut self, from_scalar: FromScalarFn) -> Self {
        self.from_scalar = Some(from_scalar);
        self
    }

    /// Returns the [`FieldInfo`] with the given declared `name`.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`FieldInfo`] at the given declaration index.
    pub fn field_at(&self, index: usize) -> Option<&FieldInfo> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FieldInfo> {
        self.fields.iter()
    }

    /// Returns the declaration index of the given field `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Resolves an incoming member name to a field, per the two-phase rule:
    /// explicit names (renames and aliases) win over declared and
    /// strategy-transformed names; within a phase the first field in
    /// declaration order wins. Fields excluded from deserialization never
    /// match.
    pub fn resolve(&self, key: &str, use_field_names: bool) -> Option<&FieldInfo> {
        let incoming = || {
            self.fields
                .iter()
                .filter(|field| field.deserialize_enabled())
        };
        incoming()
            .find(|field| field.matches_explicit(key))
            .or_else(|| incoming().find(|field| field.matches_declared(key, use_field_names)))
    }

    pub(crate) fn make_default(&self) -> Option<fn() -> Box<dyn Reflect>> {
        self.make_default
    }

    pub(crate) fn from_scalar(&self) -> Option<FromScalarFn> {
        self.from_scalar
    }
}
