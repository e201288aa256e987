use crate::*;

use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use std::cell::{Cell, RefCell};
use std::sync::Mutex;

const DAY_MS: u64 = 86_400_000;

struct FakeStore {
    records: RefCell<Vec<Record<u64>>>,
    fetches: Cell<usize>,
    fail: Cell<bool>,
}

impl FakeStore {
    fn new(records: Vec<Record<u64>>) -> Self {
        Self {
            records: RefCell::new(records),
            fetches: Cell::new(0),
            fail: Cell::new(false),
        }
    }

    fn replace(&self, records: Vec<Record<u64>>) {
        *self.records.borrow_mut() = records;
    }
}

impl RecordStore for FakeStore {
    type Id = u64;

    fn get_all(&self) -> Result<Vec<Record<u64>>, StoreError> {
        self.fetches.set(self.fetches.get() + 1);
        if self.fail.get() {
            return Err(StoreError::new("disk detached"));
        }
        Ok(self.records.borrow().clone())
    }
}

fn record(id: u64) -> Record<u64> {
    Record::new(
        id,
        format!("Case #{id}"),
        1_600_000_000_000 + id * DAY_MS,
        id % 2 == 0,
    )
}

fn records(n: usize) -> Vec<Record<u64>> {
    (0..n as u64).map(|i| record(1000 + i)).collect()
}

fn row_of(r: &Record<u64>) -> TextRow {
    TextRow {
        title: r.title.clone(),
        date_ms: r.date_ms,
        solved: r.solved,
    }
}

fn list_for(store: &FakeStore, options: ListOptions) -> ListController<&FakeStore, TextRow> {
    ListController::new(
        store,
        options,
        |_| TextRow::default(),
        SelectionBridge::detached(),
    )
}

fn recording_bridge() -> (SelectionBridge<u64>, Arc<Mutex<Vec<u64>>>) {
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&emitted);
    let bridge = SelectionBridge::new(move |id: &u64| sink.lock().unwrap().push(*id));
    (bridge, emitted)
}

/// Binds every position of the viewport's virtual range, the way a list host would.
fn layout(list: &mut ListController<&FakeStore, TextRow>, viewport: &mut Viewport) {
    viewport.set_count(list.count());
    let capacity = viewport.capacity();
    list.ensure_capacity(capacity);
    for position in viewport.virtual_range().iter() {
        list.bind(position % capacity, position).unwrap();
    }
}

#[test]
fn container_construction_is_independent_of_snapshot_length() {
    let options = ListOptions::new(1)
        .with_overscan(1)
        .with_initial_viewport(3);

    let mut at_top = Vec::new();
    for n in [5usize, 5000] {
        let store = FakeStore::new(records(n));
        let mut list = list_for(&store, options);
        assert_eq!(list.refresh().unwrap(), RefreshOutcome::Initialized);

        let mut viewport = Viewport::new(&options);
        layout(&mut list, &mut viewport);
        at_top.push(list.constructed());

        let capacity = viewport.capacity();
        let max = viewport.max_scroll_offset();
        let mut offset = 0;
        while offset <= max {
            viewport.set_scroll_offset(offset);
            layout(&mut list, &mut viewport);
            assert!(list.constructed() <= capacity);
            offset += 7;
        }
        assert!(list.pool().unwrap().live() <= capacity);
    }

    // 3 visible rows + 1 overscan row below.
    assert_eq!(at_top, vec![4, 4]);
}

#[test]
fn rebind_overwrites_every_field() {
    let store = FakeStore::new(records(5));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();

    let p = store.records.borrow()[0].clone();
    let q = store.records.borrow()[1].clone();
    assert_ne!(p.title, q.title);
    assert_ne!(p.date_ms, q.date_ms);
    assert_ne!(p.solved, q.solved);

    list.bind(0, 0).unwrap();
    assert_eq!(list.slot(0).unwrap().view(), &row_of(&p));

    list.bind(0, 1).unwrap();
    let slot = list.slot(0).unwrap();
    assert_eq!(slot.view(), &row_of(&q));
    assert_eq!(slot.record(), Some(&q));
    assert_eq!(slot.position(), Some(1));
}

#[test]
fn bind_is_idempotent() {
    let store = FakeStore::new(records(8));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(4));
    list.refresh().unwrap();

    list.bind(2, 4).unwrap();
    let view = list.slot(2).unwrap().view().clone();
    let binding = list.slot(2).unwrap().binding().cloned();

    list.bind(2, 4).unwrap();
    assert_eq!(list.slot(2).unwrap().view(), &view);
    assert_eq!(list.slot(2).unwrap().binding().cloned(), binding);
    assert_eq!(list.constructed(), 1);
}

#[test]
fn interaction_reports_the_current_binding() {
    let store = FakeStore::new(records(5));
    let (bridge, emitted) = recording_bridge();
    let mut list = ListController::new(
        &store,
        ListOptions::new(1).with_initial_viewport(3),
        |_| TextRow::default(),
        bridge,
    );
    list.refresh().unwrap();

    let a = store.records.borrow()[0].id;
    let b = store.records.borrow()[1].id;

    list.bind(0, 0).unwrap();
    list.bind(0, 1).unwrap();
    list.bind(0, 1).unwrap();

    assert_eq!(list.interact(0), Some(b));
    // One emission per interaction, no matter how often the container was rebound.
    assert_eq!(*emitted.lock().unwrap(), vec![b]);
    assert_ne!(a, b);
}

#[test]
fn interaction_on_unbound_container_emits_nothing() {
    let store = FakeStore::new(records(3));
    let (bridge, emitted) = recording_bridge();
    let mut list = ListController::new(
        &store,
        ListOptions::new(1).with_initial_viewport(3),
        |_| TextRow::default(),
        bridge,
    );
    list.refresh().unwrap();
    list.acquire(1).unwrap();

    assert_eq!(list.interact(1), None);
    assert_eq!(list.interact(2), None);
    assert!(emitted.lock().unwrap().is_empty());
}

#[test]
fn refresh_marks_dirty_without_binding() {
    let store = FakeStore::new(records(5));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    assert_eq!(list.count(), 0);
    assert_eq!(list.refresh().unwrap(), RefreshOutcome::Initialized);
    assert!(list.take_dirty());
    list.bind(0, 0).unwrap();

    let mut changed = records(5);
    changed[0].title = "Stolen bicycle".to_string();
    store.replace(changed);

    assert_eq!(list.refresh().unwrap(), RefreshOutcome::Invalidated);
    assert!(list.is_dirty());
    // The container still shows the old record until the host rebinds it.
    assert_eq!(list.slot(0).unwrap().view().title, "Case #1000");
    assert_eq!(list.constructed(), 1);

    assert!(list.take_dirty());
    assert!(!list.take_dirty());
    list.bind(0, 0).unwrap();
    assert_eq!(list.slot(0).unwrap().view().title, "Stolen bicycle");
}

#[test]
fn count_reads_the_latest_snapshot() {
    let store = FakeStore::new(records(5));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    assert_eq!(list.count(), 5);

    store.replace(records(2));
    list.refresh().unwrap();
    assert_eq!(list.count(), 2);
    assert_eq!(
        list.bind(0, 4),
        Err(Error::PositionOutOfBounds {
            position: 4,
            count: 2
        })
    );
}

#[test]
fn superseded_refresh_is_never_applied() {
    let store = FakeStore::new(records(3));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    list.bind(0, 0).unwrap();
    let before = list.slot(0).unwrap().binding().cloned();

    let first = list.begin_refresh();
    let second = list.begin_refresh();

    let newest = vec![record(7), record(8)];
    assert_eq!(
        list.complete_refresh(second, Ok(newest.clone())).unwrap(),
        RefreshOutcome::Invalidated
    );
    assert_eq!(
        list.complete_refresh(first, Ok(vec![record(1)])).unwrap(),
        RefreshOutcome::Superseded
    );

    assert_eq!(list.generation(), second.generation());
    assert_eq!(list.snapshot().records(), &newest[..]);
    assert_eq!(list.slot(0).unwrap().binding().cloned(), before);

    list.bind(0, 0).unwrap();
    assert_eq!(list.slot(0).unwrap().record(), Some(&newest[0]));
}

#[test]
fn result_arriving_before_a_newer_refresh_completes_is_discarded() {
    let store = FakeStore::new(records(3));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    let initial = list.snapshot().clone();

    let first = list.begin_refresh();
    let _second = list.begin_refresh();
    assert_eq!(
        list.complete_refresh(first, Ok(vec![record(1)])).unwrap(),
        RefreshOutcome::Superseded
    );
    // A superseded failure is discarded as well.
    assert_eq!(
        list.complete_refresh(first, Err(StoreError::new("late")))
            .unwrap(),
        RefreshOutcome::Superseded
    );
    assert!(list.snapshot().ptr_eq(&initial));
}

#[test]
fn stale_bind_is_discarded() {
    let store = FakeStore::new(records(4));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    let old = list.generation();

    store.replace(records(2));
    list.refresh().unwrap();

    assert_eq!(list.bind_for(old, 0, 3).unwrap(), BindOutcome::Stale);
    assert!(list.slot(0).is_none());

    let current = list.generation();
    assert_eq!(list.bind_for(current, 0, 1).unwrap(), BindOutcome::Bound);
    assert_eq!(list.slot(0).unwrap().position(), Some(1));
}

#[test]
fn store_failure_leaves_an_empty_list() {
    let store = FakeStore::new(records(5));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    for slot in 0..3 {
        list.bind(slot, slot).unwrap();
    }

    store.fail.set(true);
    let err = list.refresh().unwrap_err();
    assert_eq!(err, Error::StoreUnavailable(StoreError::new("disk detached")));
    assert_eq!(list.count(), 0);
    for slot in list.pool().unwrap().iter() {
        assert!(slot.binding().is_none());
        assert_eq!(slot.view(), &TextRow::default());
    }
    assert_eq!(list.interact(0), None);

    store.fail.set(false);
    assert_eq!(list.refresh().unwrap(), RefreshOutcome::Invalidated);
    assert_eq!(list.count(), 5);
}

#[test]
fn store_failure_before_first_refresh_keeps_list_detached() {
    let store = FakeStore::new(records(5));
    store.fail.set(true);
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));

    assert!(matches!(list.refresh(), Err(Error::StoreUnavailable(_))));
    assert!(!list.is_initialized());
    assert_eq!(list.count(), 0);
    assert!(matches!(list.acquire(0), Err(Error::NotAttached)));
}

#[test]
fn pool_refuses_slots_past_capacity() {
    let store = FakeStore::new(records(50));
    let options = ListOptions::new(1).with_initial_viewport(3).with_overscan(0);
    let mut list = list_for(&store, options);
    list.refresh().unwrap();

    let capacity = list.pool().unwrap().capacity();
    assert_eq!(capacity, 4);
    assert_eq!(
        list.bind(capacity, 0),
        Err(Error::SlotOutOfBounds { slot: 4, capacity })
    );

    list.ensure_capacity(6);
    list.bind(5, 0).unwrap();
    list.ensure_capacity(2);
    assert_eq!(list.pool().unwrap().capacity(), 6);
}

#[test]
fn detach_destroys_the_pool() {
    let store = FakeStore::new(records(5));
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();
    list.bind(0, 0).unwrap();
    list.bind(1, 1).unwrap();
    assert_eq!(list.constructed(), 2);

    list.detach();
    assert!(!list.is_initialized());
    assert_eq!(list.constructed(), 0);
    assert_eq!(list.refresh().unwrap(), RefreshOutcome::Initialized);
    list.bind(0, 0).unwrap();
    assert_eq!(list.constructed(), 1);
}

#[test]
fn empty_snapshot_is_not_an_error() {
    let store = FakeStore::new(Vec::new());
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    assert_eq!(list.refresh().unwrap(), RefreshOutcome::Initialized);
    assert_eq!(list.count(), 0);

    let mut pager = PagerController::new(&store, 1, PagerOptions::default(), |id: &u64| *id);
    assert_eq!(pager.attach().unwrap(), 0);
    assert_eq!(pager.count(), 0);
    assert!(pager.window().is_empty());
    assert!(matches!(
        pager.page(0),
        Err(Error::PositionOutOfBounds {
            position: 0,
            count: 0
        })
    ));
}

#[test]
fn initial_index_finds_target_or_defaults_to_first() {
    let store = FakeStore::new(vec![record(1), record(2), record(3)]);

    let mut pager = PagerController::new(&store, 2, PagerOptions::default(), |id: &u64| *id);
    assert_eq!(pager.attach().unwrap(), 1);
    assert_eq!(pager.initial_index(), 1);
    assert_eq!(pager.current(), 1);
    assert_eq!(pager.count(), 3);

    let mut missing = PagerController::new(&store, 99, PagerOptions::default(), |id: &u64| *id);
    assert_eq!(missing.attach().unwrap(), 0);
    assert_eq!(missing.page(0).copied().unwrap(), 1);
}

#[test]
fn duplicate_ids_resolve_to_first_match() {
    let store = FakeStore::new(vec![record(1), record(2), record(2), record(3)]);
    let mut pager = PagerController::new(&store, 2, PagerOptions::default(), |id: &u64| *id);
    assert_eq!(pager.attach().unwrap(), 1);
    assert_eq!(position_of(&store.records.borrow()[..], &2), Some(1));
}

#[test]
fn pager_builds_pages_lazily_within_window() {
    let store = FakeStore::new(records(1000));
    let target = store.records.borrow()[500].id;
    let mut pager =
        PagerController::new(&store, target, PagerOptions::default(), |id: &u64| *id);

    assert_eq!(pager.page(0).err(), Some(Error::NotAttached));
    assert_eq!(pager.attach().unwrap(), 500);
    assert_eq!(pager.constructed(), 0);
    assert_eq!(pager.window(), 499..502);

    for position in pager.window() {
        pager.page(position).unwrap();
    }
    assert_eq!(pager.constructed(), 3);
    assert_eq!(pager.current_page(), Some(&target));

    pager.set_current(501).unwrap();
    assert!(!pager.is_built(499));
    assert!(pager.is_built(500));
    assert_eq!(*pager.page(502).unwrap(), target + 2);
    assert_eq!(pager.constructed(), 4);
    assert_eq!(pager.built(), 3);

    // Revisiting a cached page does not rebuild it.
    pager.page(501).unwrap();
    assert_eq!(pager.constructed(), 4);

    assert_eq!(
        pager.set_current(1000),
        Err(Error::PositionOutOfBounds {
            position: 1000,
            count: 1000
        })
    );
}

#[test]
fn pager_window_is_clamped_at_both_ends() {
    let store = FakeStore::new(records(3));
    let options = PagerOptions::default().with_offscreen_limit(2);
    let mut pager = PagerController::new(&store, 1000, options, |id: &u64| *id);
    pager.attach().unwrap();
    assert_eq!(pager.window(), 0..3);

    pager.set_current(2).unwrap();
    assert_eq!(pager.window(), 0..3);
}

#[test]
fn pager_attaches_once() {
    let store = FakeStore::new(records(4));
    let mut pager = PagerController::new(&store, 1002, PagerOptions::default(), |id: &u64| *id);
    pager.attach().unwrap();

    store.replace(records(1));
    assert_eq!(pager.attach().unwrap(), 2);
    assert_eq!(pager.count(), 4);
    assert_eq!(store.fetches.get(), 1);
}

#[test]
fn pager_attach_failure_leaves_it_detached() {
    let store = FakeStore::new(records(4));
    store.fail.set(true);
    let mut pager = PagerController::new(&store, 1002, PagerOptions::default(), |id: &u64| *id);

    assert!(matches!(pager.attach(), Err(Error::StoreUnavailable(_))));
    assert!(!pager.is_attached());
    assert_eq!(pager.count(), 0);

    store.fail.set(false);
    assert_eq!(pager.attach().unwrap(), 2);
}

#[test]
fn pager_and_list_share_ordering() {
    let store = FakeStore::new(vec![record(9), record(4), record(6), record(1)]);
    let mut list = list_for(&store, ListOptions::new(1).with_initial_viewport(3));
    list.refresh().unwrap();

    let mut pager = PagerController::new(&store, 6, PagerOptions::default(), |id: &u64| *id);
    pager.attach().unwrap();

    let list_ids: Vec<u64> = list.snapshot().iter().map(|r| r.id).collect();
    let pager_ids: Vec<u64> = pager.snapshot().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(list_ids, pager_ids);
    assert_eq!(list_ids[pager.initial_index()], 6);

    let mut shared = PagerController::new(&store, 1, PagerOptions::default(), |id: &u64| *id);
    assert_eq!(shared.attach_snapshot(list.snapshot().clone()), 3);
    assert!(shared.snapshot().unwrap().ptr_eq(list.snapshot()));
}

#[test]
fn fixed_size_range_and_total() {
    let options = ListOptions::new(1).with_initial_viewport(10);
    let mut v = Viewport::new(&options);
    v.set_count(100);
    assert_eq!(v.total_size(), 100);

    let r = v.virtual_range();
    assert_eq!(r.start_index, 0);
    // 10 visible + overscan(1) at end
    assert_eq!(r.end_index, 11);
    assert_eq!(v.capacity(), 13);
}

#[test]
fn overscan_and_scroll() {
    let options = ListOptions::new(1).with_initial_viewport(10);
    let mut v = Viewport::new(&options);
    v.set_count(100);
    v.set_scroll_offset(50);
    let r = v.virtual_range();
    assert_eq!(r.start_index, 49);
    assert_eq!(r.end_index, 61);
}

#[test]
fn unaligned_rows_straddle_the_viewport() {
    let options = ListOptions::new(4).with_initial_viewport(10).with_overscan(0);
    let mut v = Viewport::new(&options);
    v.set_count(100);
    v.set_scroll_offset(2);
    // Rows 0 (2..4), 1 (4..8), 2 (8..12) intersect [2, 12).
    assert_eq!(
        v.visible_range(),
        VirtualRange {
            start_index: 0,
            end_index: 3
        }
    );
    assert!(v.virtual_range().len() <= v.capacity());
    assert_eq!(v.index_at_offset(9), Some(2));
    assert_eq!(v.index_at_offset(400), None);
    assert_eq!(v.item_start(3), Some(12));
}

#[test]
fn scroll_offset_is_clamped() {
    let options = ListOptions::new(2).with_initial_viewport(10);
    let mut v = Viewport::new(&options);
    v.set_count(20);
    assert_eq!(v.max_scroll_offset(), 30);
    v.set_scroll_offset_clamped(1000);
    assert_eq!(v.scroll_offset(), 30);
    assert_eq!(v.visible_range().end_index, 20);

    v.set_count(3);
    assert_eq!(v.max_scroll_offset(), 0);
    assert_eq!(v.visible_range(), VirtualRange { start_index: 0, end_index: 3 });
}

#[test]
fn scroll_to_index_alignments() {
    let options = ListOptions::new(1).with_initial_viewport(10);
    let mut v = Viewport::new(&options);
    v.set_count(100);

    assert_eq!(v.scroll_to_index_offset(50, Align::Start), 50);
    assert_eq!(v.scroll_to_index_offset(50, Align::End), 41);
    assert_eq!(v.scroll_to_index_offset(50, Align::Center), 45);
    assert_eq!(v.scroll_to_index_offset(5, Align::Auto), 0);
    assert_eq!(v.scroll_to_index_offset(50, Align::Auto), 41);
    assert_eq!(v.scroll_to_index_offset(500, Align::Start), 90);
}

#[test]
fn errors_display_their_context() {
    let err = Error::from(StoreError::new("locked"));
    assert_eq!(err.to_string(), "record store unavailable: locked");
    assert_eq!(
        Error::SlotOutOfBounds {
            slot: 7,
            capacity: 6
        }
        .to_string(),
        "slot 7 out of bounds (capacity=6)"
    );
    assert!(core::error::Error::source(&err).is_some());
}
