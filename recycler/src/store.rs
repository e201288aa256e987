use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Generation, Record, RecordId, StoreError};

/// The read contract of the persistent record store.
///
/// Each call is treated as authoritative at call time. Implementations may cache internally,
/// but the ordering they return is the ordering both the list and the pager render.
pub trait RecordStore {
    type Id: RecordId;

    fn get_all(&self) -> Result<Vec<Record<Self::Id>>, StoreError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    type Id = S::Id;

    fn get_all(&self) -> Result<Vec<Record<Self::Id>>, StoreError> {
        (**self).get_all()
    }
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    type Id = S::Id;

    fn get_all(&self) -> Result<Vec<Record<Self::Id>>, StoreError> {
        (**self).get_all()
    }
}

/// An ordered, point-in-time sequence of records.
///
/// Cloning is cheap: clones share the same record buffer, so a list and a pager built from one
/// fetch see exactly the same order.
#[derive(Clone, Debug)]
pub struct Snapshot<Id> {
    records: Arc<[Record<Id>]>,
    generation: Generation,
}

impl<Id> Snapshot<Id> {
    pub fn new(generation: Generation, records: Vec<Record<Id>>) -> Self {
        Self {
            records: records.into(),
            generation,
        }
    }

    pub fn empty(generation: Generation) -> Self {
        Self::new(generation, Vec::new())
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record<Id>> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[Record<Id>] {
        &self.records
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Record<Id>> {
        self.records.iter()
    }

    /// Returns `true` when both snapshots share the same record buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<Id: PartialEq> Snapshot<Id> {
    pub fn position_of(&self, id: &Id) -> Option<usize> {
        position_of(&self.records, id)
    }
}

/// Linear scan for the first record whose id equals `id`.
///
/// Duplicate ids resolve to the first match.
pub fn position_of<Id: PartialEq>(records: &[Record<Id>], id: &Id) -> Option<usize> {
    records.iter().position(|r| r.id == *id)
}
