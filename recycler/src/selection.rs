use alloc::sync::Arc;
use core::fmt;

use crate::{ContainerSlot, RecordId};

/// A callback fired with the id of the record a user interacted with.
pub type SelectCallback<Id> = Arc<dyn Fn(&Id) + Send + Sync>;

/// Routes interactions on a container to the navigation boundary.
///
/// The bridge never captures a record. It reads the container's binding cell at the moment of
/// the interaction, so a container that has been rebound many times reports the record it
/// shows now.
pub struct SelectionBridge<Id> {
    on_select: SelectCallback<Id>,
}

impl<Id> Clone for SelectionBridge<Id> {
    fn clone(&self) -> Self {
        Self {
            on_select: Arc::clone(&self.on_select),
        }
    }
}

impl<Id> fmt::Debug for SelectionBridge<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionBridge").finish_non_exhaustive()
    }
}

impl<Id: RecordId> SelectionBridge<Id> {
    pub fn new(on_select: impl Fn(&Id) + Send + Sync + 'static) -> Self {
        Self {
            on_select: Arc::new(on_select),
        }
    }

    /// A bridge that emits nowhere. Interactions still resolve to an id.
    pub fn detached() -> Self {
        Self::new(|_| {})
    }

    /// Emits the id currently bound to `slot`.
    ///
    /// Returns the emitted id, or `None` when the container is not bound to any record.
    pub fn select<V>(&self, slot: &ContainerSlot<Id, V>) -> Option<Id> {
        let Some(binding) = slot.binding() else {
            rdebug!(slot = slot.index(), "select: container is unbound");
            return None;
        };
        let id = binding.record.id.clone();
        rdebug!(
            slot = slot.index(),
            position = binding.position,
            id = ?id,
            "select"
        );
        (self.on_select)(&id);
        Some(id)
    }
}
