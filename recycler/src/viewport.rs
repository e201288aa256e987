use core::cmp;

use crate::{Align, ListOptions, VirtualRange};

/// Fixed-row virtualization math for a list host.
///
/// This type is UI-agnostic: it holds no containers and no records, only the numbers a host
/// needs to decide which snapshot positions are on screen. Every row has the same size on the
/// scroll axis, so offset → index lookups are a single division.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Viewport {
    count: usize,
    row_size: u32,
    viewport_size: u32,
    scroll_offset: u64,
    overscan: usize,
}

/// The maximum number of positions a virtual range can cover for the given geometry.
///
/// A window of `viewport_size` units can straddle `ceil(viewport_size / row_size) + 1` rows
/// when it is not aligned to a row boundary; overscan adds `overscan` rows on each side.
pub fn capacity_for(viewport_size: u32, row_size: u32, overscan: usize) -> usize {
    if viewport_size == 0 {
        return 0;
    }
    let rows = viewport_size.div_ceil(row_size.max(1)) as usize;
    rows.saturating_add(1).saturating_add(overscan.saturating_mul(2))
}

impl Viewport {
    pub fn new(options: &ListOptions) -> Self {
        Self {
            count: 0,
            row_size: options.row_size.max(1),
            viewport_size: options.initial_viewport,
            scroll_offset: options.initial_offset,
            overscan: options.overscan,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Updates the item count. The scroll offset is left untouched; call
    /// [`Self::set_scroll_offset_clamped`] afterwards if the list may have shrunk.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
    }

    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.overscan = overscan;
    }

    pub fn viewport_size(&self) -> u32 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        self.scroll_offset = self.clamp_scroll_offset(offset);
    }

    pub fn capacity(&self) -> usize {
        capacity_for(self.viewport_size, self.row_size, self.overscan)
    }

    pub fn total_size(&self) -> u64 {
        (self.count as u64).saturating_mul(self.row_size as u64)
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_size().saturating_sub(self.viewport_size as u64)
    }

    pub fn clamp_scroll_offset(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = offset / self.row_size as u64;
        usize::try_from(index).ok().filter(|&i| i < self.count)
    }

    pub fn item_start(&self, index: usize) -> Option<u64> {
        (index < self.count).then(|| (index as u64).saturating_mul(self.row_size as u64))
    }

    /// Positions intersecting the viewport, without overscan.
    pub fn visible_range(&self) -> VirtualRange {
        if self.count == 0 || self.viewport_size == 0 {
            return VirtualRange::EMPTY;
        }

        let row = self.row_size as u64;
        let view = self.viewport_size as u64;
        let scroll_offset = self.clamp_scroll_offset(self.scroll_offset);
        let visible_end_inclusive = scroll_offset.saturating_add(view).saturating_sub(1);

        let start = (scroll_offset / row) as usize;
        let end = (visible_end_inclusive / row) as usize + 1;

        VirtualRange {
            start_index: start.min(self.count),
            end_index: end.min(self.count),
        }
    }

    /// Positions a host should bind: the visible range widened by `overscan` on each side.
    pub fn virtual_range(&self) -> VirtualRange {
        let mut range = self.visible_range();
        if range.is_empty() {
            return range;
        }
        range.start_index = range.start_index.saturating_sub(self.overscan);
        range.end_index = cmp::min(self.count, range.end_index.saturating_add(self.overscan));
        range
    }

    /// Computes the clamped scroll offset that brings `index` into view with `align`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> u64 {
        if self.count == 0 {
            return 0;
        }
        let index = index.min(self.count - 1);
        let row = self.row_size as u64;
        let start = (index as u64).saturating_mul(row);
        let end = start.saturating_add(row);
        let view = self.viewport_size as u64;

        let target = match align {
            Align::Start => start,
            Align::End => end.saturating_sub(view),
            Align::Center => start.saturating_add(row / 2).saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll_offset;
                let cur_end = cur.saturating_add(view);
                if start >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start
                } else {
                    end.saturating_sub(view)
                }
            }
        };

        self.clamp_scroll_offset(target)
    }
}
