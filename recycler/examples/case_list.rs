// Example: a 10k-record list rendered through a handful of recycled containers.
use recycler::{
    ListController, ListOptions, PagerController, PagerOptions, Record, RecordStore,
    SelectionBridge, StoreError, TextRow, Viewport,
};

struct CaseStore(Vec<Record<u64>>);

impl RecordStore for CaseStore {
    type Id = u64;

    fn get_all(&self) -> Result<Vec<Record<u64>>, StoreError> {
        Ok(self.0.clone())
    }
}

fn main() -> Result<(), recycler::Error> {
    let store = CaseStore(
        (0..10_000u64)
            .map(|i| Record::new(i, format!("Case #{i}"), 1_700_000_000_000 + i, i % 2 == 0))
            .collect(),
    );

    let options = ListOptions::new(1).with_initial_viewport(12).with_overscan(2);
    let bridge = SelectionBridge::new(|id: &u64| println!("selected case {id}"));
    let mut list = ListController::new(&store, options, |_| TextRow::default(), bridge);
    list.refresh()?;

    let mut viewport = Viewport::new(&options);
    viewport.set_count(list.count());
    let capacity = viewport.capacity();

    for offset in [0u64, 500, 9_000] {
        viewport.set_scroll_offset_clamped(offset);
        for position in viewport.virtual_range().iter() {
            list.bind(position % capacity, position)?;
        }
    }
    println!(
        "records={}, containers built={}, capacity={capacity}",
        list.count(),
        list.constructed()
    );

    // The container showing position 9_005 was built for an earlier position and rebound since.
    let selected = list.interact(9_005 % capacity);
    println!("interaction emitted {selected:?}");

    let Some(id) = selected else {
        return Ok(());
    };
    let mut pager = PagerController::new(&store, id, PagerOptions::default(), |id: &u64| {
        format!("detail page for case {id}")
    });
    let initial = pager.attach()?;
    println!("pager opens at {initial} of {}", pager.count());
    println!("{}", pager.page(initial)?);
    Ok(())
}
