use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::Result;
use crate::{Binding, Error, Generation, Record, RecordId, SelectionBridge};

/// The display surface of one list row.
///
/// `bind` always calls every setter, so implementations never need to diff against the
/// previous record: whatever a reused container showed before is overwritten.
pub trait RecordView {
    fn set_title(&mut self, title: &str);
    fn set_date(&mut self, date_ms: u64);
    fn set_solved(&mut self, solved: bool);
    /// Resets the view to its empty state.
    fn clear(&mut self);
}

/// A headless [`RecordView`] that stores exactly what a row displays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRow {
    pub title: String,
    pub date_ms: u64,
    pub solved: bool,
}

impl RecordView for TextRow {
    fn set_title(&mut self, title: &str) {
        self.title.clear();
        self.title.push_str(title);
    }

    fn set_date(&mut self, date_ms: u64) {
        self.date_ms = date_ms;
    }

    fn set_solved(&mut self, solved: bool) {
        self.solved = solved;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Builds the view for a viewport slot. Called once per slot for the lifetime of a pool.
pub type ViewFactory<V> = Arc<dyn Fn(usize) -> V + Send + Sync>;

/// A reusable container: a view, its binding cell, and the selection handler wired when the
/// container was built.
pub struct ContainerSlot<Id, V> {
    index: usize,
    view: V,
    binding: Option<Binding<Id>>,
    handler: SelectionBridge<Id>,
}

impl<Id: fmt::Debug, V: fmt::Debug> fmt::Debug for ContainerSlot<Id, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSlot")
            .field("index", &self.index)
            .field("view", &self.view)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl<Id, V> ContainerSlot<Id, V> {
    /// Viewport slot this container is cached under.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn binding(&self) -> Option<&Binding<Id>> {
        self.binding.as_ref()
    }

    pub fn record(&self) -> Option<&Record<Id>> {
        self.binding.as_ref().map(|b| &b.record)
    }

    pub fn position(&self) -> Option<usize> {
        self.binding.as_ref().map(|b| b.position)
    }
}

impl<Id: RecordId, V: RecordView> ContainerSlot<Id, V> {
    fn new(index: usize, view: V, handler: SelectionBridge<Id>) -> Self {
        Self {
            index,
            view,
            binding: None,
            handler,
        }
    }

    /// Writes `record` into the binding cell and every displayed field.
    pub fn bind(&mut self, record: &Record<Id>, position: usize, generation: Generation) {
        self.view.set_title(&record.title);
        self.view.set_date(record.date_ms);
        self.view.set_solved(record.solved);
        self.binding = Some(Binding {
            record: record.clone(),
            position,
            generation,
        });
    }

    pub fn unbind(&mut self) {
        self.view.clear();
        self.binding = None;
    }

    /// Delivers a user interaction to the handler wired at construction.
    pub fn interact(&self) -> Option<Id> {
        self.handler.select(self)
    }
}

/// A bounded arena of containers indexed by viewport slot.
///
/// Containers are created lazily on first `acquire` of a slot and then reused for every
/// record that slot ever shows. The pool never holds more than `capacity` containers,
/// whatever the length of the snapshot being rendered.
pub struct ContainerPool<Id, V> {
    slots: Vec<Option<ContainerSlot<Id, V>>>,
    capacity: usize,
    constructed: usize,
    factory: ViewFactory<V>,
    bridge: SelectionBridge<Id>,
}

impl<Id: fmt::Debug, V: fmt::Debug> fmt::Debug for ContainerPool<Id, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerPool")
            .field("capacity", &self.capacity)
            .field("constructed", &self.constructed)
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

impl<Id: RecordId, V: RecordView> ContainerPool<Id, V> {
    pub fn new(capacity: usize, factory: ViewFactory<V>, bridge: SelectionBridge<Id>) -> Self {
        rdebug!(capacity, "ContainerPool::new");
        Self {
            slots: Vec::new(),
            capacity,
            constructed: 0,
            factory,
            bridge,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raises the capacity to at least `capacity`. Capacity never shrinks while the pool lives.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if capacity > self.capacity {
            rtrace!(from = self.capacity, to = capacity, "ContainerPool::ensure_capacity");
            self.capacity = capacity;
        }
    }

    /// Number of containers built so far.
    pub fn constructed(&self) -> usize {
        self.constructed
    }

    /// Returns the container for `slot`, building it on first use.
    pub fn acquire(&mut self, slot: usize) -> Result<&mut ContainerSlot<Id, V>> {
        if slot >= self.capacity {
            rwarn!(slot, capacity = self.capacity, "acquire: slot out of bounds");
            return Err(Error::SlotOutOfBounds {
                slot,
                capacity: self.capacity,
            });
        }
        if self.slots.len() <= slot {
            self.slots.resize_with(slot + 1, || None);
        }

        let factory = &self.factory;
        let bridge = &self.bridge;
        let constructed = &mut self.constructed;
        Ok(self.slots[slot].get_or_insert_with(|| {
            *constructed += 1;
            rdebug!(slot, constructed = *constructed, "construct container");
            ContainerSlot::new(slot, factory(slot), bridge.clone())
        }))
    }

    pub fn get(&self, slot: usize) -> Option<&ContainerSlot<Id, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Live containers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ContainerSlot<Id, V>> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    pub fn live(&self) -> usize {
        self.iter().count()
    }

    /// Resets every live container to the unbound, empty state.
    pub fn clear_bindings(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.unbind();
        }
    }
}
