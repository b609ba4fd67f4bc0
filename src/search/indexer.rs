//! Item indexing
//!
//! An [`Indexer`] turns caller-owned items into a representation that is
//! cheap to match repeatedly, and recovers the original item afterwards.

/// Maps items to their indexed form and back.
///
/// `extract(&index(x))` must equal `x`.
pub trait Indexer<T> {
    type Indexed;

    fn index(&self, item: &T) -> Self::Indexed;

    fn extract(&self, indexed: &Self::Indexed) -> T;
}

/// Named string fields of an indexed item, for field-scoped filters
pub trait FieldLookup {
    fn field(&self, name: &str) -> Option<&str>;
}
