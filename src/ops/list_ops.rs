use crate::Reflect;

// -----------------------------------------------------------------------------
// List

/// Element access for ordered sequences: `Vec`, `VecDeque` and fixed-size
/// arrays.
pub trait List: Reflect {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns an iterator over the elements in order.
    fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}
