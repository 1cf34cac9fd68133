use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// allowing access to type information without an instance of the type.
///
/// # Examples
///
/// ```
/// use jsonbind::derive::Reflect;
/// use jsonbind::info::{ReflectKind, Typed};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let info = Point::type_info();
/// assert_eq!(info.kind(), ReflectKind::Struct);
/// assert_eq!(info.as_struct().unwrap().field_len(), 2);
/// ```
///
/// # Manual implementations
///
/// Implementations store their [`TypeInfo`] in a
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) (or a
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell) for generic
/// types) so that it is built exactly once:
///
/// ```ignore
/// impl Typed for MyType {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
/// ```
pub trait Typed: 'static {
    /// Returns the type's [`TypeInfo`], building it on first access.
    fn type_info() -> &'static TypeInfo;
}
