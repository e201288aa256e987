use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::error::Result;
use crate::{
    BindOutcome, ContainerPool, ContainerSlot, Error, Generation, ListOptions, Record,
    RecordStore, RecordView, RefreshOutcome, RefreshTicket, SelectionBridge, Snapshot, StoreError,
    ViewFactory,
};

/// Keeps a bounded pool of containers consistent with the store's current ordering.
///
/// A host drives this type like a platform list adapter:
/// - `refresh()` when the screen (re)appears,
/// - `count()` at the start of every layout pass,
/// - `acquire(slot)` / `bind(slot, position)` for each on-screen position,
/// - `take_dirty()` to learn that on-screen slots must be rebound after a refresh.
///
/// The controller never binds on its own: a refresh only marks it dirty, so the work is
/// bounded by what the host actually shows.
pub struct ListController<S: RecordStore, V> {
    store: S,
    options: ListOptions,
    snapshot: Snapshot<S::Id>,
    pool: Option<ContainerPool<S::Id, V>>,
    factory: ViewFactory<V>,
    bridge: SelectionBridge<S::Id>,
    dirty: bool,
    requested: Generation,
}

impl<S: RecordStore, V: fmt::Debug> fmt::Debug for ListController<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("options", &self.options)
            .field("snapshot", &self.snapshot)
            .field("pool", &self.pool)
            .field("dirty", &self.dirty)
            .field("requested", &self.requested)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore, V: RecordView> ListController<S, V> {
    pub fn new(
        store: S,
        options: ListOptions,
        factory: impl Fn(usize) -> V + Send + Sync + 'static,
        bridge: SelectionBridge<S::Id>,
    ) -> Self {
        Self {
            store,
            options,
            snapshot: Snapshot::empty(0),
            pool: None,
            factory: Arc::new(factory),
            bridge,
            dirty: false,
            requested: 0,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current snapshot length. Zero before the first successful refresh or after a failed one.
    pub fn count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn snapshot(&self) -> &Snapshot<S::Id> {
        &self.snapshot
    }

    pub fn generation(&self) -> Generation {
        self.snapshot.generation()
    }

    pub fn is_initialized(&self) -> bool {
        self.pool.is_some()
    }

    pub fn pool(&self) -> Option<&ContainerPool<S::Id, V>> {
        self.pool.as_ref()
    }

    /// Number of containers built since the pool was created.
    pub fn constructed(&self) -> usize {
        self.pool.as_ref().map_or(0, ContainerPool::constructed)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns whether visible slots must be rebound, and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Grows the pool so `capacity` slots can be acquired. No-op before initialization.
    pub fn ensure_capacity(&mut self, capacity: usize) {
        if let Some(pool) = self.pool.as_mut() {
            pool.ensure_capacity(capacity);
        }
    }

    pub fn acquire(&mut self, slot: usize) -> Result<&mut ContainerSlot<S::Id, V>> {
        self.pool.as_mut().ok_or(Error::NotAttached)?.acquire(slot)
    }

    pub fn slot(&self, slot: usize) -> Option<&ContainerSlot<S::Id, V>> {
        self.pool.as_ref()?.get(slot)
    }

    /// Writes the record at `position` into the container for `slot`.
    ///
    /// Every displayed field is rewritten, so binding twice with the same arguments yields the
    /// same state and rebinding a reused container leaves nothing of its previous record.
    pub fn bind(&mut self, slot: usize, position: usize) -> Result<()> {
        let count = self.snapshot.len();
        let record = self
            .snapshot
            .get(position)
            .ok_or(Error::PositionOutOfBounds { position, count })?;
        let generation = self.snapshot.generation();
        let pool = self.pool.as_mut().ok_or(Error::NotAttached)?;
        rtrace!(slot, position, generation, "bind");
        pool.acquire(slot)?.bind(record, position, generation);
        Ok(())
    }

    /// Like [`Self::bind`], but only if `generation` is still the current snapshot.
    ///
    /// Hosts that resolve positions asynchronously pass the generation they computed the
    /// position against; a result that arrives after a newer refresh is discarded.
    pub fn bind_for(
        &mut self,
        generation: Generation,
        slot: usize,
        position: usize,
    ) -> Result<BindOutcome> {
        if generation != self.snapshot.generation() {
            rdebug!(
                slot,
                position,
                generation,
                current = self.snapshot.generation(),
                "bind_for: stale generation discarded"
            );
            return Ok(BindOutcome::Stale);
        }
        self.bind(slot, position)?;
        Ok(BindOutcome::Bound)
    }

    /// Routes an interaction on `slot` through the handler wired when it was built.
    pub fn interact(&self, slot: usize) -> Option<S::Id> {
        self.slot(slot)?.interact()
    }

    /// Re-fetches the snapshot from the store.
    ///
    /// The first successful refresh creates the container pool. Later refreshes replace the
    /// snapshot and mark the controller dirty without touching any container.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] when the fetch fails. The controller is left in an
    /// empty state: `count()` is zero and no container keeps a binding.
    pub fn refresh(&mut self) -> Result<RefreshOutcome> {
        let ticket = self.begin_refresh();
        let fetched = self.store.get_all();
        self.complete_refresh(ticket, fetched)
    }

    /// Starts a refresh whose fetch completes elsewhere. Any earlier ticket is superseded.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.requested = self.requested.saturating_add(1);
        rtrace!(generation = self.requested, "begin_refresh");
        RefreshTicket {
            generation: self.requested,
        }
    }

    /// Applies the fetch result for `ticket`, unless a newer refresh was started meanwhile.
    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        fetched: Result<Vec<Record<S::Id>>, StoreError>,
    ) -> Result<RefreshOutcome> {
        if ticket.generation != self.requested {
            rdebug!(
                generation = ticket.generation,
                latest = self.requested,
                "complete_refresh: superseded result discarded"
            );
            return Ok(RefreshOutcome::Superseded);
        }

        let records = match fetched {
            Ok(records) => records,
            Err(err) => {
                rwarn!(generation = ticket.generation, error = %err, "refresh failed");
                self.snapshot = Snapshot::empty(ticket.generation);
                if let Some(pool) = self.pool.as_mut() {
                    pool.clear_bindings();
                }
                self.dirty = true;
                return Err(Error::StoreUnavailable(err));
            }
        };

        self.snapshot = Snapshot::new(ticket.generation, records);
        if self.pool.is_none() {
            rdebug!(
                generation = ticket.generation,
                count = self.snapshot.len(),
                "refresh: initialized"
            );
            self.pool = Some(ContainerPool::new(
                self.options.initial_capacity(),
                Arc::clone(&self.factory),
                self.bridge.clone(),
            ));
            self.dirty = true;
            return Ok(RefreshOutcome::Initialized);
        }

        rdebug!(
            generation = ticket.generation,
            count = self.snapshot.len(),
            "refresh: invalidated"
        );
        self.dirty = true;
        Ok(RefreshOutcome::Invalidated)
    }

    /// Destroys the pool, as when the viewport itself goes away.
    ///
    /// The snapshot is kept; the next refresh builds a fresh pool.
    pub fn detach(&mut self) {
        rdebug!(
            constructed = self.constructed(),
            "detach: container pool destroyed"
        );
        self.pool = None;
        self.dirty = false;
    }
}
