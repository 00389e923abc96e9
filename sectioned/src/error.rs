//! Errors returned when the adapter's contract is misused.

use alloc::string::String;

use crate::{Slot, ViewType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A section is already registered under this key.
    #[error("section `{0}` is already registered")]
    DuplicateKey(String),

    /// No section is registered under this key.
    #[error("no section registered under `{0}`")]
    NotFound(String),

    /// A flat position outside `0..count`.
    #[error("position {position} is out of range (item count {count})")]
    OutOfRange { position: usize, count: usize },

    /// A holder was requested for a slot whose layout was never configured.
    #[error("section `{key}` has no {slot} layout")]
    MissingLayout { key: String, slot: Slot },

    /// A position was requested for a slot the section does not currently show.
    #[error("section `{key}` does not show a {slot}")]
    NotShown { key: String, slot: Slot },

    /// The section is registered but hidden, so it has no flat positions.
    #[error("section `{0}` is hidden")]
    Hidden(String),

    /// A view type that no registered section owns.
    #[error("view type {0} does not belong to any registered section")]
    UnknownViewType(ViewType),

    /// Every view type number has been reserved by earlier registrations.
    #[error("no view types left to reserve for a new section")]
    ViewTypesExhausted,
}

pub type Result<T> = core::result::Result<T, Error>;
