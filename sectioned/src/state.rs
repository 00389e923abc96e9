use alloc::string::String;

use crate::State;

/// A lightweight, serializable snapshot of one section's runtime flags.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
///
/// Useful for restoring which sections were hidden, loading or failed across sessions
/// without serializing the sections themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionSnapshot {
    pub key: String,
    pub state: State,
    pub visible: bool,
    pub has_header: bool,
    pub has_footer: bool,
}
