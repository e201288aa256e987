use core::fmt::Debug;

/// Bounds required of a record identifier.
///
/// Identifiers are opaque to this crate: they are only cloned, compared for equality and
/// formatted for diagnostics.
pub trait RecordId: Clone + PartialEq + Debug {}
impl<T: Clone + PartialEq + Debug> RecordId for T {}
