//! Headless container recycling for record lists and pagers.
//!
//! For host-level utilities (layout passes, anchoring across refreshes, navigation), see the
//! `recycler-adapter` crate.
//!
//! This crate keeps a small, bounded pool of visual containers consistent with an arbitrarily
//! large, changing sequence of records, and resolves which detail page a pager should open on
//! for a given record id:
//! - [`ListController`] binds snapshot positions into pooled containers and owns refresh logic.
//! - [`SelectionBridge`] reports the record a container shows at the moment it is interacted
//!   with.
//! - [`PagerController`] builds detail pages lazily and computes the initial page from an id.
//! - [`Viewport`] computes which positions are on screen for fixed-size rows.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`RecordStore`] implementation
//! - a [`RecordView`] for list rows and a page type for the pager
//! - viewport size and scroll offset
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod key;
mod list;
mod options;
mod pager;
mod pool;
mod selection;
mod store;
mod types;
mod viewport;

#[cfg(test)]
mod tests;

pub use error::{Error, Result, StoreError};
pub use key::RecordId;
pub use list::ListController;
pub use options::{ListOptions, PagerOptions};
pub use pager::{PageFactory, PagerController};
pub use pool::{ContainerPool, ContainerSlot, RecordView, TextRow, ViewFactory};
pub use selection::{SelectCallback, SelectionBridge};
pub use store::{RecordStore, Snapshot, position_of};
pub use types::{
    Align, BindOutcome, Binding, Generation, Record, RefreshOutcome, RefreshTicket, VirtualRange,
};
pub use viewport::{Viewport, capacity_for};
