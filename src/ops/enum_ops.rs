use crate::Reflect;

// -----------------------------------------------------------------------------
// Enum

/// Variant access for unit-variant enums.
///
/// An enum crosses the wire as its symbolic variant name.
pub trait Enum: Reflect {
    /// Returns the name of the active variant.
    fn variant_name(&self) -> &'static str;

    /// Returns the declaration index of the active variant.
    fn variant_index(&self) -> usize;
}
