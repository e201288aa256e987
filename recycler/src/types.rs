use alloc::string::String;

/// The refresh number a snapshot (or a pending fetch) belongs to.
///
/// Generations increase monotonically per controller. `0` is the empty snapshot a controller
/// starts with before its first refresh.
pub type Generation = u64;

/// A single domain item shown as one list row and one pager page.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record<Id> {
    pub id: Id,
    pub title: String,
    /// Milliseconds since the Unix epoch.
    pub date_ms: u64,
    pub solved: bool,
}

impl<Id> Record<Id> {
    pub fn new(id: Id, title: impl Into<String>, date_ms: u64, solved: bool) -> Self {
        Self {
            id,
            title: title.into(),
            date_ms,
            solved,
        }
    }
}

/// The content of a container's binding cell: the record most recently written into it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binding<Id> {
    pub record: Record<Id>,
    /// Snapshot position the record was read from.
    pub position: usize,
    pub generation: Generation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VirtualRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// Issued by [`crate::ListController::begin_refresh`] and redeemed by
/// [`crate::ListController::complete_refresh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket {
    pub(crate) generation: Generation,
}

impl RefreshTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RefreshOutcome {
    /// First successful fetch: the container pool was created.
    Initialized,
    /// The snapshot was replaced and the controller marked dirty. Nothing was rebound yet.
    Invalidated,
    /// A newer refresh was requested before this one completed; its result was discarded.
    Superseded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindOutcome {
    Bound,
    /// The bind targeted a snapshot generation that is no longer current.
    Stale,
}
