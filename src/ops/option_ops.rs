use crate::Reflect;

// -----------------------------------------------------------------------------
// Optional

/// Access to the declared-nullable shape, `Option<T>`.
pub trait Optional: Reflect {
    /// Returns the inner value, or `None` for the null state.
    fn value(&self) -> Option<&dyn Reflect>;
}
