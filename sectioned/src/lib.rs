//! Headless sectioning for flat list widgets.
//!
//! For host-side utilities (holder pooling, range rendering, anchors), see the
//! `sectioned-adapter` crate.
//!
//! A [`SectionedAdapter`] composes independently configured sections into one flat list. Each
//! section has its own optional header and footer, its own item layout and a load
//! [`State`]: while `Loading` or `Failed` it shows a single placeholder row instead of its
//! items. Sections can be hidden without being removed.
//!
//! The core is the translation between a flat position and (section, [`Role`], local index),
//! plus a [`ViewType`] per (section, slot) so that recycled views are never shared between
//! structurally different rows.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a holder type `H` and an inflater from [`LayoutId`] to `H`
//! - a rendering surface that asks for `item_count`, `view_type`, and `bind`
//! - a change listener that reacts to [`Change`] notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod error;
mod section;
mod state;
mod types;


pub use adapter::{OnChangeCallback, SectionedAdapter};
pub use error::{Error, Result};
pub use section::{Section, SectionExt, SectionLayouts, SectionProps, Stateless, StatelessSection};
pub use state::SectionSnapshot;
pub use types::{Change, ContentKind, LayoutId, ResolvedPosition, Role, Slot, State, ViewType};
