#[cfg(feature = "std")]
use alloc::collections::VecDeque;
#[cfg(feature = "std")]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::{Mutex, PoisonError};

use recycler::{Record, RecordId, RecordStore, Result};
#[cfg(feature = "std")]
use recycler::SelectionBridge;

/// The only thing handed from the list to the pager: the id of the selected record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerRequest<Id> {
    pub record_id: Id,
}

impl<Id: RecordId> PagerRequest<Id> {
    pub fn new(record_id: Id) -> Self {
        Self { record_id }
    }

    /// Looks the record up in `store`, independently of any snapshot the list holds.
    ///
    /// Returns `Ok(None)` when the record has been removed since it was selected.
    pub fn resolve<S: RecordStore<Id = Id>>(&self, store: &S) -> Result<Option<Record<Id>>> {
        let records = store.get_all()?;
        Ok(records.into_iter().find(|r| r.id == self.record_id))
    }
}

/// Collects the requests emitted by a list's [`SelectionBridge`] until the host navigates.
#[cfg(feature = "std")]
pub struct NavigationQueue<Id> {
    pending: Arc<Mutex<VecDeque<PagerRequest<Id>>>>,
}

#[cfg(feature = "std")]
impl<Id> Clone for NavigationQueue<Id> {
    fn clone(&self) -> Self {
        Self {
            pending: Arc::clone(&self.pending),
        }
    }
}

#[cfg(feature = "std")]
impl<Id: RecordId> core::fmt::Debug for NavigationQueue<Id> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NavigationQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(feature = "std")]
impl<Id: RecordId> Default for NavigationQueue<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl<Id: RecordId> NavigationQueue<Id> {
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// A bridge that enqueues a [`PagerRequest`] for every selection.
    pub fn bridge(&self) -> SelectionBridge<Id>
    where
        Id: Send + 'static,
    {
        let pending = Arc::clone(&self.pending);
        SelectionBridge::new(move |id: &Id| {
            pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(PagerRequest::new(id.clone()));
        })
    }

    /// Takes the oldest pending request.
    pub fn pop(&self) -> Option<PagerRequest<Id>> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
