/// Configuration for [`crate::ListController`] and [`crate::Viewport`].
///
/// Sizes are in abstract layout units on the scroll axis (rows for a terminal, pixels for a GUI).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Fixed size of one row on the scroll axis. Clamped to at least 1.
    pub row_size: u32,
    /// Extra positions bound before and after the visible range.
    pub overscan: usize,
    /// Viewport size applied before the host reports a real one.
    pub initial_viewport: u32,
    pub initial_offset: u64,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            row_size: 1,
            overscan: 1,
            initial_viewport: 0,
            initial_offset: 0,
        }
    }
}

impl ListOptions {
    pub fn new(row_size: u32) -> Self {
        Self {
            row_size: row_size.max(1),
            ..Self::default()
        }
    }

    pub fn with_row_size(mut self, row_size: u32) -> Self {
        self.row_size = row_size.max(1);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: u32) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: u64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    /// Pool capacity for the initial viewport.
    pub fn initial_capacity(&self) -> usize {
        crate::viewport::capacity_for(self.initial_viewport, self.row_size, self.overscan)
    }
}

/// Configuration for [`crate::PagerController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerOptions {
    /// Pages kept alive on each side of the current page.
    pub offscreen_limit: usize,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self { offscreen_limit: 1 }
    }
}

impl PagerOptions {
    pub fn with_offscreen_limit(mut self, offscreen_limit: usize) -> Self {
        self.offscreen_limit = offscreen_limit;
        self
    }
}
