//! Host utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on the pool, binding and lookup rules. This
//! crate provides small, framework-neutral hosts that drive it the way a platform list or pager
//! widget would:
//!
//! - A list host running layout passes over a fixed-row viewport
//! - Scroll anchoring by record id across refreshes
//! - A pager host that opens on a requested record and builds pages around the current one
//! - Navigation requests that carry nothing but a record id
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod list_host;
mod navigation;
mod pager_host;


pub use anchor::{RecordAnchor, apply_anchor, capture_first_visible_anchor};
pub use list_host::{LayoutPass, ListHost};
#[cfg(feature = "std")]
pub use navigation::NavigationQueue;
pub use navigation::PagerRequest;
pub use pager_host::PagerHost;
