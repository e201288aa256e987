use alloc::vec::Vec;

use recycler::{
    Align, ContainerSlot, Generation, ListController, RecordStore, RecordView, Result, Viewport,
    VirtualRange,
};

use crate::{apply_anchor, capture_first_visible_anchor};

/// What a single layout pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutPass {
    /// Positions that are bound after the pass (visible range plus overscan).
    pub range: VirtualRange,
    /// Number of `bind` calls issued.
    pub bound: usize,
    pub generation: Generation,
}

/// A framework-neutral list host that drives a [`ListController`] the way a platform list
/// widget would.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `refresh` / `on_resume` when the screen (re)appears
/// - `on_viewport_size` / `on_scroll` when UI events occur
/// - `tap(position)` when the user selects a row
///
/// Every entry point ends with a layout pass that reads `count()` first and then binds each
/// position of the virtual range to slot `position % capacity`.
#[derive(Debug)]
pub struct ListHost<S: RecordStore, V> {
    list: ListController<S, V>,
    viewport: Viewport,
    capacity: usize,
    // Position each slot currently shows.
    shown: Vec<Option<usize>>,
}

impl<S: RecordStore, V: RecordView> ListHost<S, V> {
    pub fn new(list: ListController<S, V>) -> Self {
        let viewport = Viewport::new(list.options());
        Self {
            list,
            viewport,
            capacity: 0,
            shown: Vec::new(),
        }
    }

    pub fn list(&self) -> &ListController<S, V> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ListController<S, V> {
        &mut self.list
    }

    pub fn into_list(self) -> ListController<S, V> {
        self.list
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Re-fetches the records and keeps the first visible record on top.
    ///
    /// If that record is gone, the previous offset is kept (clamped to the new length).
    ///
    /// # Errors
    /// Propagates the store failure; the host then shows nothing.
    pub fn refresh(&mut self) -> Result<LayoutPass> {
        let anchor = capture_first_visible_anchor(&self.viewport, self.list.snapshot());

        if let Err(err) = self.list.refresh() {
            self.viewport.set_count(0);
            self.viewport.set_scroll_offset(0);
            self.forget_shown();
            return Err(err);
        }

        self.viewport.set_count(self.list.count());
        let anchored = anchor
            .as_ref()
            .is_some_and(|a| apply_anchor(&mut self.viewport, self.list.snapshot(), a));
        if !anchored {
            let offset = self.viewport.scroll_offset();
            self.viewport.set_scroll_offset_clamped(offset);
        }
        self.layout()
    }

    /// Called when the list screen becomes visible again, e.g. after the pager closes.
    pub fn on_resume(&mut self) -> Result<LayoutPass> {
        self.refresh()
    }

    pub fn on_viewport_size(&mut self, viewport_size: u32) -> Result<LayoutPass> {
        self.viewport.set_viewport_size(viewport_size);
        self.layout()
    }

    /// Applies a scroll offset reported by the UI (clamped).
    pub fn on_scroll(&mut self, scroll_offset: u64) -> Result<LayoutPass> {
        self.viewport.set_scroll_offset_clamped(scroll_offset);
        self.layout()
    }

    pub fn scroll_to_position(&mut self, position: usize, align: Align) -> Result<LayoutPass> {
        let offset = self.viewport.scroll_to_index_offset(position, align);
        self.viewport.set_scroll_offset(offset);
        self.layout()
    }

    /// Binds whatever the current viewport shows.
    ///
    /// Slots already showing their position are skipped, unless the controller was marked
    /// dirty by a refresh.
    pub fn layout(&mut self) -> Result<LayoutPass> {
        let count = self.list.count();
        self.viewport.set_count(count);
        let offset = self.viewport.scroll_offset();
        self.viewport.set_scroll_offset_clamped(offset);

        let capacity = self.viewport.capacity();
        if capacity != self.capacity {
            self.capacity = capacity;
            self.forget_shown();
            self.shown.resize(capacity, None);
        }
        self.list.ensure_capacity(capacity);

        if self.list.take_dirty() {
            self.forget_shown();
        }

        let range = self.viewport.virtual_range();
        let mut bound = 0;
        for position in range.iter() {
            let slot = position % capacity;
            if self.shown[slot] == Some(position) {
                continue;
            }
            self.list.bind(slot, position)?;
            self.shown[slot] = Some(position);
            bound += 1;
        }

        Ok(LayoutPass {
            range,
            bound,
            generation: self.list.generation(),
        })
    }

    /// The slot currently showing `position`, if any.
    pub fn slot_for(&self, position: usize) -> Option<usize> {
        if self.capacity == 0 {
            return None;
        }
        let slot = position % self.capacity;
        (self.shown.get(slot).copied().flatten() == Some(position)).then_some(slot)
    }

    /// Delivers a user selection of the row at `position`.
    ///
    /// Returns the emitted record id, or `None` when no container shows that position.
    pub fn tap(&self, position: usize) -> Option<S::Id> {
        let slot = self.slot_for(position)?;
        self.list.interact(slot)
    }

    /// Visits the visible (non-overscan) rows in order.
    pub fn for_each_visible(&self, mut f: impl FnMut(usize, &ContainerSlot<S::Id, V>)) {
        for position in self.viewport.visible_range().iter() {
            let Some(slot) = self.slot_for(position) else {
                continue;
            };
            if let Some(container) = self.list.slot(slot) {
                f(position, container);
            }
        }
    }

    fn forget_shown(&mut self) {
        self.shown.iter_mut().for_each(|s| *s = None);
    }
}
