use core::fmt;

use recycler::{RecordId, Snapshot, Viewport};

/// A scroll anchor that keeps the viewport on the same record across a refresh.
///
/// Typical use cases:
/// - returning from the pager after records were added above the one on top
/// - any reorder/replace where the list should stay on the record the user was looking at
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordAnchor<Id> {
    pub id: Id,
    /// The distance from the anchored row's start to the viewport's scroll offset.
    pub offset_in_viewport: u64,
}

impl<Id: fmt::Debug> fmt::Debug for RecordAnchor<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordAnchor")
            .field("id", &self.id)
            .field("offset_in_viewport", &self.offset_in_viewport)
            .finish()
    }
}

/// Captures an anchor for the first visible record.
///
/// Returns `None` if nothing is visible or the snapshot does not cover the visible range.
pub fn capture_first_visible_anchor<Id: RecordId>(
    viewport: &Viewport,
    snapshot: &Snapshot<Id>,
) -> Option<RecordAnchor<Id>> {
    let visible = viewport.visible_range();
    if visible.is_empty() {
        return None;
    }
    let index = visible.start_index;
    let start = viewport.item_start(index)?;
    let id = snapshot.get(index)?.id.clone();
    let offset_in_viewport = viewport.scroll_offset().saturating_sub(start);
    Some(RecordAnchor {
        id,
        offset_in_viewport,
    })
}

/// Applies a previously captured anchor against the *current* snapshot by adjusting the scroll
/// offset.
///
/// The viewport's count must already match `snapshot`. Returns `true` when the anchored record
/// was found and the offset applied.
pub fn apply_anchor<Id: RecordId>(
    viewport: &mut Viewport,
    snapshot: &Snapshot<Id>,
    anchor: &RecordAnchor<Id>,
) -> bool {
    let Some(index) = snapshot.position_of(&anchor.id) else {
        return false;
    };
    let Some(start) = viewport.item_start(index) else {
        return false;
    };
    let target = start.saturating_add(anchor.offset_in_viewport);
    viewport.set_scroll_offset_clamped(target);
    true
}
