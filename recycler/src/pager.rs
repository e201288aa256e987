use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::fmt;
use core::ops::Range;

use crate::error::Result;
use crate::{Error, PagerOptions, RecordStore, Snapshot};

/// Builds the detail page for a record id.
pub type PageFactory<Id, P> = Arc<dyn Fn(&Id) -> P + Send + Sync>;

/// Lazily materializes one page per record and lands on the record it was opened for.
///
/// The snapshot is fetched once, on [`Self::attach`], and kept for the controller's lifetime so
/// the initial index stays meaningful while the user swipes. Pages are built on demand and only
/// those within `offscreen_limit` of the current page are kept.
pub struct PagerController<S: RecordStore, P> {
    store: S,
    target: S::Id,
    options: PagerOptions,
    factory: PageFactory<S::Id, P>,
    snapshot: Option<Snapshot<S::Id>>,
    initial_index: usize,
    current: usize,
    pages: BTreeMap<usize, P>,
    constructed: usize,
}

impl<S: RecordStore, P> fmt::Debug for PagerController<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerController")
            .field("target", &self.target)
            .field("options", &self.options)
            .field("count", &self.count())
            .field("initial_index", &self.initial_index)
            .field("current", &self.current)
            .field("built", &self.pages.keys())
            .field("constructed", &self.constructed)
            .finish_non_exhaustive()
    }
}

impl<S: RecordStore, P> PagerController<S, P> {
    pub fn new(
        store: S,
        target: S::Id,
        options: PagerOptions,
        factory: impl Fn(&S::Id) -> P + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            target,
            options,
            factory: Arc::new(factory),
            snapshot: None,
            initial_index: 0,
            current: 0,
            pages: BTreeMap::new(),
            constructed: 0,
        }
    }

    pub fn target(&self) -> &S::Id {
        &self.target
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn is_attached(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn snapshot(&self) -> Option<&Snapshot<S::Id>> {
        self.snapshot.as_ref()
    }

    /// Fetches and retains the snapshot, then resolves the initial index.
    ///
    /// Attaching twice does not fetch again.
    ///
    /// # Errors
    /// Returns [`Error::StoreUnavailable`] when the fetch fails; the pager stays detached and
    /// `count()` remains zero.
    pub fn attach(&mut self) -> Result<usize> {
        if self.snapshot.is_some() {
            return Ok(self.initial_index);
        }
        let records = self.store.get_all().map_err(|err| {
            rwarn!(target_id = ?self.target, error = %err, "pager attach failed");
            Error::StoreUnavailable(err)
        })?;
        Ok(self.attach_snapshot(Snapshot::new(1, records)))
    }

    /// Retains an already fetched snapshot (for instance the one the list rendered from).
    ///
    /// Ignored when a snapshot is already attached.
    pub fn attach_snapshot(&mut self, snapshot: Snapshot<S::Id>) -> usize {
        if self.snapshot.is_some() {
            return self.initial_index;
        }
        let initial_index = match snapshot.position_of(&self.target) {
            Some(position) => position,
            None => {
                rdebug!(
                    target_id = ?self.target,
                    count = snapshot.len(),
                    "lookup miss: landing on the first page"
                );
                0
            }
        };
        rdebug!(
            count = snapshot.len(),
            initial_index,
            "PagerController::attach"
        );
        self.initial_index = initial_index;
        self.current = initial_index;
        self.snapshot = Some(snapshot);
        initial_index
    }

    pub fn count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, Snapshot::len)
    }

    /// The first position holding the target id, or 0 when it is absent.
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Positions whose pages are kept alive around the current page.
    pub fn window(&self) -> Range<usize> {
        let limit = self.options.offscreen_limit;
        let start = self.current.saturating_sub(limit);
        let end = self
            .current
            .saturating_add(limit)
            .saturating_add(1)
            .min(self.count());
        start..end.max(start)
    }

    /// Moves to `position` and drops cached pages that fall outside the new window.
    pub fn set_current(&mut self, position: usize) -> Result<()> {
        let count = self.count();
        if position >= count {
            return Err(Error::PositionOutOfBounds { position, count });
        }
        self.current = position;
        let window = self.window();
        self.pages.retain(|&p, _| {
            let keep = window.contains(&p);
            if !keep {
                rtrace!(position = p, "evict page");
            }
            keep
        });
        Ok(())
    }

    /// Returns the page for `position`, building it on first request.
    pub fn page(&mut self, position: usize) -> Result<&P> {
        let snapshot = self.snapshot.as_ref().ok_or(Error::NotAttached)?;
        let count = snapshot.len();
        let record = snapshot
            .get(position)
            .ok_or(Error::PositionOutOfBounds { position, count })?;

        let factory = &self.factory;
        let constructed = &mut self.constructed;
        Ok(self.pages.entry(position).or_insert_with(|| {
            *constructed += 1;
            rdebug!(position, id = ?record.id, "construct page");
            factory(&record.id)
        }))
    }

    pub fn current_page(&self) -> Option<&P> {
        self.pages.get(&self.current)
    }

    pub fn is_built(&self, position: usize) -> bool {
        self.pages.contains_key(&position)
    }

    /// Number of pages currently cached.
    pub fn built(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages built over the controller's lifetime.
    pub fn constructed(&self) -> usize {
        self.constructed
    }
}
