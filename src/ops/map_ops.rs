use crate::Reflect;

// -----------------------------------------------------------------------------
// Map

/// Entry access for map values: `HashMap`, `BTreeMap`, `IndexMap`.
///
/// Iteration follows the map's own order; for insertion-ordered maps that
/// order is preserved on the wire.
pub trait Map: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns an iterator over the entries.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;
}
