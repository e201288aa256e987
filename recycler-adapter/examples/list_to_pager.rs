// Example: select a row, navigate to the pager, come back and keep the list anchored.
use std::cell::RefCell;

use recycler::{
    ListController, ListOptions, PagerOptions, Record, RecordStore, StoreError, TextRow,
};
use recycler_adapter::{ListHost, NavigationQueue, PagerHost};

struct CaseStore(RefCell<Vec<Record<u64>>>);

impl RecordStore for CaseStore {
    type Id = u64;

    fn get_all(&self) -> Result<Vec<Record<u64>>, StoreError> {
        Ok(self.0.borrow().clone())
    }
}

fn case(id: u64) -> Record<u64> {
    Record::new(id, format!("Case #{id}"), 1_700_000_000_000 + id, false)
}

fn main() -> Result<(), recycler::Error> {
    let store = CaseStore(RefCell::new((100..200).map(case).collect()));
    let queue = NavigationQueue::new();

    let list = ListController::new(
        &store,
        ListOptions::new(1).with_initial_viewport(10),
        |_| TextRow::default(),
        queue.bridge(),
    );
    let mut host = ListHost::new(list);
    host.refresh()?;
    let pass = host.on_scroll(42)?;
    println!("bound {} rows, showing {:?}", pass.bound, pass.range);

    host.tap(45);
    let Some(request) = queue.pop() else {
        return Ok(());
    };

    let mut pager = PagerHost::open(&store, request, PagerOptions::default(), |id: &u64| {
        format!("detail page for case {id}")
    })?;
    println!("pager at {}: {:?}", pager.current(), pager.current_page());
    pager.next()?;
    println!("swiped to {}: {:?}", pager.current(), pager.current_page());

    // New cases arrive while the pager is open.
    let mut arrived: Vec<Record<u64>> = (0..5).map(case).collect();
    arrived.extend(store.0.borrow().iter().cloned());
    *store.0.borrow_mut() = arrived;

    let pass = host.on_resume()?;
    println!(
        "after resume: scroll_offset={}, showing {:?}",
        host.viewport().scroll_offset(),
        pass.range
    );
    host.for_each_visible(|position, row| {
        println!("{position:>4} {}", row.view().title);
    });
    Ok(())
}
