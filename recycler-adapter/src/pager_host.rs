use recycler::{PagerController, PagerOptions, RecordStore, Result, Snapshot};

use crate::PagerRequest;

/// A framework-neutral pager host.
///
/// Opening a host attaches the controller (which resolves the initial index) before any page
/// is requested, so the first materialized page is the requested record's page. Only the
/// window around the current page is ever built.
#[derive(Debug)]
pub struct PagerHost<S: RecordStore, P> {
    pager: PagerController<S, P>,
}

impl<S: RecordStore, P> PagerHost<S, P> {
    /// Opens a pager for `request`, fetching its own snapshot from `store`.
    ///
    /// # Errors
    /// Propagates a store failure from the fetch.
    pub fn open(
        store: S,
        request: PagerRequest<S::Id>,
        options: PagerOptions,
        factory: impl Fn(&S::Id) -> P + Send + Sync + 'static,
    ) -> Result<Self> {
        let mut pager = PagerController::new(store, request.record_id, options, factory);
        pager.attach()?;
        Self::with_attached(pager)
    }

    /// Opens a pager over a snapshot that was already fetched, e.g. the list's.
    pub fn open_with_snapshot(
        store: S,
        request: PagerRequest<S::Id>,
        options: PagerOptions,
        factory: impl Fn(&S::Id) -> P + Send + Sync + 'static,
        snapshot: Snapshot<S::Id>,
    ) -> Result<Self> {
        let mut pager = PagerController::new(store, request.record_id, options, factory);
        pager.attach_snapshot(snapshot);
        Self::with_attached(pager)
    }

    fn with_attached(pager: PagerController<S, P>) -> Result<Self> {
        let mut host = Self { pager };
        host.materialize()?;
        Ok(host)
    }

    pub fn pager(&self) -> &PagerController<S, P> {
        &self.pager
    }

    pub fn into_pager(self) -> PagerController<S, P> {
        self.pager
    }

    pub fn current(&self) -> usize {
        self.pager.current()
    }

    pub fn current_page(&self) -> Option<&P> {
        self.pager.current_page()
    }

    /// Moves to `position` and builds the pages of the new window.
    pub fn swipe_to(&mut self, position: usize) -> Result<Option<&P>> {
        self.pager.set_current(position)?;
        self.materialize()?;
        Ok(self.pager.current_page())
    }

    /// Moves one page forward. Returns `false` at the last page.
    pub fn next(&mut self) -> Result<bool> {
        let next = self.pager.current().saturating_add(1);
        if next >= self.pager.count() {
            return Ok(false);
        }
        self.swipe_to(next)?;
        Ok(true)
    }

    /// Moves one page back. Returns `false` at the first page.
    pub fn previous(&mut self) -> Result<bool> {
        let Some(previous) = self.pager.current().checked_sub(1) else {
            return Ok(false);
        };
        self.swipe_to(previous)?;
        Ok(true)
    }

    /// Builds every page of the current window that is not built yet. Returns how many were built.
    pub fn materialize(&mut self) -> Result<usize> {
        let mut built = 0;
        for position in self.pager.window() {
            if !self.pager.is_built(position) {
                self.pager.page(position)?;
                built += 1;
            }
        }
        Ok(built)
    }
}
