use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct

/// Field access for struct values.
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect); the field
/// indices and names match the [`StructInfo`](crate::info::StructInfo) field
/// table, which is generated alongside.
///
/// # Examples
///
/// ```
/// use jsonbind::derive::Reflect;
/// use jsonbind::ops::Struct;
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let point = Point { x: 1.0, y: 2.0 };
/// assert_eq!(point.field("y").unwrap().downcast_ref::<f64>(), Some(&2.0));
/// assert!(point.field("z").is_none());
/// ```
pub trait Struct: Reflect {
    /// Returns the value of the field with the given declared name.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the value of the field with the given declared name, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the value of the field at the given declaration index.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the number of fields.
    fn field_len(&self) -> usize;
}
