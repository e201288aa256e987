use alloc::string::String;
use core::fmt;

/// An opaque failure reported by a [`crate::RecordStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record store unavailable: {}", self.message)
    }
}

impl core::error::Error for StoreError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The store fetch failed. The controller shows an empty state afterwards.
    StoreUnavailable(StoreError),
    /// A snapshot position past the end of the current snapshot.
    PositionOutOfBounds { position: usize, count: usize },
    /// A viewport slot past the pool capacity.
    SlotOutOfBounds { slot: usize, capacity: usize },
    /// The controller has no pool (list) or no snapshot (pager) yet.
    NotAttached,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StoreUnavailable(err) => write!(f, "{err}"),
            Self::PositionOutOfBounds { position, count } => {
                write!(f, "position {position} out of bounds (count={count})")
            }
            Self::SlotOutOfBounds { slot, capacity } => {
                write!(f, "slot {slot} out of bounds (capacity={capacity})")
            }
            Self::NotAttached => f.write_str("controller is not attached"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::StoreUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::StoreUnavailable(err)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
