//! # lww-element-dict
//!
//! A last-write-wins element dictionary: a state-based CRDT mapping keys to
//! values.
//!
//! Replicas accept `add`, `remove` and `update` independently, each stamped
//! with a caller-supplied, totally ordered timestamp. Merging any number of
//! replicas, in any order and any number of times, converges to the same
//! state.
//!
//! ## `no_std` Support
//!
//! This crate supports `no_std` environments with the `alloc` crate.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! lww-element-dict = { version = "0.1", default-features = false }
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use lww_element_dict::prelude::*;
//!
//! let mut phone: LWWDict<&str, &str, u64> = LWWDict::new();
//! phone.add("title", "draft", 1);
//!
//! let mut laptop = phone.clone();
//! laptop.update("title", "final", 3);
//! phone.remove("title", 2);
//!
//! // The update at t=3 is newer than the remove at t=2.
//! phone.merge(&laptop);
//! assert_eq!(phone.lookup(&"title"), Some(&"final"));
//! ```
//!
//! ## Semantics
//!
//! - An add replaces the stored record for a key only if it is strictly
//!   newer, or equally new and preferred by the [`TieBreak`] policy.
//! - A remove records a tombstone, keeping the latest timestamp seen. A
//!   remove for a key that was never added is ignored.
//! - A key is live iff its add-record is strictly newer than its tombstone;
//!   removal wins ties.
//! - Tombstones are never garbage collected.
//!
//! Timestamps come from outside (a logical counter, a hybrid clock, a wall
//! clock). They must be totally ordered, and every replica must use the same
//! tie-break policy; neither is checked at runtime.
//!
//! ## Logging
//!
//! Discarded operations are reported at `trace` level and merges at `debug`
//! level through the [`log`] facade.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod crdt;
mod delta;
mod dict;
mod record;
#[cfg(feature = "wasm")]
mod wasm;

pub mod events;
pub mod prelude;
pub mod tie_break;

pub use crdt::{Crdt, DeltaCrdt};
pub use delta::DictDelta;
pub use dict::LWWDict;
pub use record::AddRecord;
pub use tie_break::TieBreak;
