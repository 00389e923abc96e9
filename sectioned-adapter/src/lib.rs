//! Adapter utilities for the `sectioned` crate.
//!
//! The `sectioned` crate is UI-agnostic and focuses on index translation and section state.
//! This crate provides small, framework-neutral helpers for hosts without a recycling list
//! widget of their own:
//!
//! - Holder pooling keyed by view type
//! - A controller that realizes and binds a flat range of rows
//! - Position anchors that survive hiding, loading and re-registration of sections
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod controller;
mod pool;

#[cfg(test)]
mod tests;

pub use anchor::{SectionAnchor, capture_anchor, resolve_anchor};
pub use controller::{Controller, Realized};
pub use pool::HolderPool;
